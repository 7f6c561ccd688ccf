mod common;

use campuslink::{
    domain::{
        CategoryFilter, ComplaintStatus, ItemKind, LostFoundFilter, NewAnnouncement,
        NewComplaint, NewLostFoundItem, NewNewsItem, NewSkillListing,
    },
    error::AppError,
    repository::{
        AnnouncementRepository, ComplaintRepository, LostFoundRepository, NewsRepository,
        SkillRepository, SqliteAnnouncementRepository, SqliteComplaintRepository,
        SqliteLostFoundRepository, SqliteNewsRepository, SqliteSkillRepository,
    },
};
use uuid::Uuid;

fn announcement(title: &str, category: &str) -> NewAnnouncement {
    NewAnnouncement {
        title: title.to_string(),
        content: format!("{} details", title),
        category: category.to_string(),
        author: None,
    }
}

fn lost_found(title: &str, category: &str, kind: ItemKind) -> NewLostFoundItem {
    NewLostFoundItem {
        title: title.to_string(),
        description: "Left near the cafeteria".to_string(),
        category: category.to_string(),
        kind,
        location: "Main Cafeteria".to_string(),
        contact: "someone@college.edu".to_string(),
    }
}

#[tokio::test]
async fn test_announcement_create_and_read_back() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteAnnouncementRepository::new(pool.clone());

    let created = repo.create(NewAnnouncement {
        title: "Mid-Semester Exams".to_string(),
        content: "Schedule released".to_string(),
        category: "academic".to_string(),
        author: Some("Academic Office".to_string()),
    }).await?;

    let found = repo.find_by_id(created.id).await?.expect("announcement should exist");
    assert_eq!(found.title, "Mid-Semester Exams");
    assert_eq!(found.content, "Schedule released");
    assert_eq!(found.category, "academic");
    assert_eq!(found.author, "Academic Office");
    assert_eq!(found.date, created.date);

    let defaulted = repo.create(announcement("Library hours", "facilities")).await?;
    assert_eq!(defaulted.author, "Admin");

    assert!(repo.find_by_id(Uuid::new_v4()).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_announcement_list_is_newest_first_and_filters_exactly() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteAnnouncementRepository::new(pool.clone());

    let first = repo.create(announcement("Exam schedule", "academic")).await?;
    let second = repo.create(announcement("Tech fest", "events")).await?;
    let third = repo.create(announcement("Lab closure", "academic")).await?;
    repo.create(announcement("Case check", "Academic")).await?;

    let all = repo.list(&CategoryFilter::default()).await?;
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].date >= w[1].date));

    let academic = repo.list(&CategoryFilter::category("academic")).await?;
    let ids: Vec<Uuid> = academic.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);

    let events = repo.list(&CategoryFilter::category("events")).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, second.id);

    assert!(repo.list(&CategoryFilter::category("sports")).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_lost_found_filters_by_category_and_type() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteLostFoundRepository::new(pool.clone());

    let wallet = repo.create(lost_found("Black wallet", "personal", ItemKind::Lost)).await?;
    let phone = repo.create(lost_found("Blue phone", "electronics", ItemKind::Found)).await?;
    let backpack = repo.create(lost_found("Red backpack", "personal", ItemKind::Found)).await?;

    assert_eq!(wallet.status, "active");
    assert_eq!(wallet.kind, ItemKind::Lost);

    let found_items = repo.list(&LostFoundFilter { category: None, kind: Some(ItemKind::Found) }).await?;
    let ids: Vec<Uuid> = found_items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![backpack.id, phone.id]);

    let personal_found = repo.list(&LostFoundFilter {
        category: Some("personal".to_string()),
        kind: Some(ItemKind::Found),
    }).await?;
    assert_eq!(personal_found.len(), 1);
    assert_eq!(personal_found[0].id, backpack.id);

    let personal = repo.list(&LostFoundFilter {
        category: Some("personal".to_string()),
        kind: None,
    }).await?;
    assert_eq!(personal.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_complaint_defaults_and_status_overwrite() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteComplaintRepository::new(pool.clone());

    let complaint = repo.create(NewComplaint {
        title: "No water in Block C".to_string(),
        description: "Rooms 301-320 without water".to_string(),
        category: "water".to_string(),
        room_number: Some("301".to_string()),
        priority: None,
        student_name: None,
        contact: None,
    }).await?;

    assert_eq!(complaint.priority, "medium");
    assert_eq!(complaint.status, ComplaintStatus::Pending);
    assert_eq!(complaint.room_number, "301");
    assert_eq!(complaint.student_name, "");
    assert!(complaint.updated_at.is_none());

    let resolved = repo.update_status(complaint.id, ComplaintStatus::Resolved).await?;
    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    assert!(resolved.updated_at.is_some());

    // No transition rules: resolved can go straight back to pending.
    let reopened = repo.update_status(complaint.id, ComplaintStatus::Pending).await?;
    assert_eq!(reopened.status, ComplaintStatus::Pending);

    let missing = repo.update_status(Uuid::new_v4(), ComplaintStatus::InProgress).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let listed = repo.list(&CategoryFilter::category("water")).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, ComplaintStatus::Pending);

    Ok(())
}

#[tokio::test]
async fn test_skill_listing_defaults() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteSkillRepository::new(pool.clone());

    let skill = repo.create(NewSkillListing {
        title: "Python for beginners".to_string(),
        description: "Basics and small projects".to_string(),
        category: "programming".to_string(),
        instructor: "Sarah Wilson".to_string(),
        contact: "sarah@college.edu".to_string(),
        duration: None,
        price: None,
    }).await?;

    assert_eq!(skill.duration, "1 hour");
    assert_eq!(skill.price, "Free");
    assert_eq!(skill.status, "available");

    let priced = repo.create(NewSkillListing {
        title: "Web design".to_string(),
        description: "HTML and CSS".to_string(),
        category: "design".to_string(),
        instructor: "Mike Chen".to_string(),
        contact: "mike@college.edu".to_string(),
        duration: Some("3 hours".to_string()),
        price: Some("500".to_string()),
    }).await?;

    let found = repo.find_by_id(priced.id).await?.expect("skill should exist");
    assert_eq!(found.duration, "3 hours");
    assert_eq!(found.price, "500");

    let all = repo.list(&CategoryFilter::default()).await?;
    assert_eq!(all.iter().map(|s| s.id).collect::<Vec<_>>(), vec![priced.id, skill.id]);

    Ok(())
}

#[tokio::test]
async fn test_news_defaults() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteNewsRepository::new(pool.clone());

    let item = repo.create(NewNewsItem {
        title: "GSoC applications open".to_string(),
        content: "Apply before the deadline".to_string(),
        category: "internships".to_string(),
        author: None,
        url: None,
    }).await?;

    assert_eq!(item.author, "Admin");
    assert_eq!(item.url, "");

    let linked = repo.create(NewNewsItem {
        title: "Imagine Cup".to_string(),
        content: "Register now".to_string(),
        category: "hackathons".to_string(),
        author: Some("Tech News Team".to_string()),
        url: Some("https://imaginecup.microsoft.com/".to_string()),
    }).await?;

    let hackathons = repo.list(&CategoryFilter::category("hackathons")).await?;
    assert_eq!(hackathons.len(), 1);
    assert_eq!(hackathons[0].id, linked.id);
    assert_eq!(hackathons[0].url, "https://imaginecup.microsoft.com/");

    Ok(())
}
