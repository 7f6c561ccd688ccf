use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{
        CategoryFilter, NewSkillListing, SkillListing, DEFAULT_PRICE, DEFAULT_SESSION_DURATION,
        SKILL_AVAILABLE,
    },
    error::{AppError, Result},
    repository::SkillRepository,
};

#[derive(FromRow)]
struct SkillRow {
    id: String,
    title: String,
    description: String,
    category: String,
    instructor: String,
    contact: String,
    duration: String,
    price: String,
    status: String,
    created_at: NaiveDateTime,
}

pub struct SqliteSkillRepository {
    pool: SqlitePool,
}

impl SqliteSkillRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_skill(row: SkillRow) -> Result<SkillListing> {
        Ok(SkillListing {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            description: row.description,
            category: row.category,
            instructor: row.instructor,
            contact: row.contact,
            duration: row.duration,
            price: row.price,
            status: row.status,
            date: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl SkillRepository for SqliteSkillRepository {
    async fn create(&self, skill: NewSkillListing) -> Result<SkillListing> {
        let id = Uuid::new_v4();
        let duration = skill.duration.unwrap_or_else(|| DEFAULT_SESSION_DURATION.to_string());
        let price = skill.price.unwrap_or_else(|| DEFAULT_PRICE.to_string());
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO skills (
                id, title, description, category, instructor, contact,
                duration, price, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&skill.title)
        .bind(&skill.description)
        .bind(&skill.category)
        .bind(&skill.instructor)
        .bind(&skill.contact)
        .bind(&duration)
        .bind(&price)
        .bind(SKILL_AVAILABLE)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created skill listing".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SkillListing>> {
        let row = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, title, description, category, instructor, contact,
                   duration, price, status, created_at
            FROM skills
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_skill).transpose()
    }

    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<SkillListing>> {
        let rows = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, title, description, category, instructor, contact,
                   duration, price, status, created_at
            FROM skills
            WHERE (?1 IS NULL OR category = ?1)
            ORDER BY created_at DESC, rowid DESC
            "#
        )
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_skill)
            .collect()
    }
}
