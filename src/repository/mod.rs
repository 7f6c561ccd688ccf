use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod lost_found_repository;
pub mod timetable_repository;
pub mod complaint_repository;
pub mod skill_repository;
pub mod news_repository;
pub mod poll_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use lost_found_repository::SqliteLostFoundRepository;
pub use timetable_repository::SqliteTimetableRepository;
pub use complaint_repository::SqliteComplaintRepository;
pub use skill_repository::SqliteSkillRepository;
pub use news_repository::SqliteNewsRepository;
pub use poll_repository::SqlitePollRepository;

// Every `list` returns newest first.

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Announcement>>;
}

#[async_trait]
pub trait LostFoundRepository: Send + Sync {
    async fn create(&self, item: NewLostFoundItem) -> Result<LostFoundItem>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LostFoundItem>>;
    async fn list(&self, filter: &LostFoundFilter) -> Result<Vec<LostFoundItem>>;
}

#[async_trait]
pub trait TimetableRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Timetable>>;
    /// Overwrites the whole schedule, creating the document if needed.
    async fn replace_schedule(&self, user_id: &str, schedule: Vec<ScheduleEntry>) -> Result<Timetable>;
    /// Pushes one entry onto the schedule, creating the document if needed.
    async fn append_schedule_item(&self, user_id: &str, entry: ScheduleEntry) -> Result<Timetable>;
}

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create(&self, complaint: NewComplaint) -> Result<Complaint>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>>;
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Complaint>>;
    async fn update_status(&self, id: Uuid, status: ComplaintStatus) -> Result<Complaint>;
}

#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn create(&self, skill: NewSkillListing) -> Result<SkillListing>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SkillListing>>;
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<SkillListing>>;
}

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn create(&self, item: NewNewsItem) -> Result<NewsItem>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewsItem>>;
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<NewsItem>>;
}

#[async_trait]
pub trait PollRepository: Send + Sync {
    async fn create(&self, poll: NewPoll) -> Result<Poll>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Poll>>;
    async fn list(&self) -> Result<Vec<Poll>>;
    /// Records the ballot unless this voter already has one on the poll.
    /// The check and the write are a single statement.
    async fn record_vote(&self, poll_id: Uuid, voter_id: &str, option: &str) -> Result<VoteOutcome>;
}
