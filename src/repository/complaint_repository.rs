use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{CategoryFilter, Complaint, ComplaintStatus, NewComplaint, DEFAULT_PRIORITY},
    error::{AppError, Result},
    repository::ComplaintRepository,
};

#[derive(FromRow)]
struct ComplaintRow {
    id: String,
    title: String,
    description: String,
    category: String,
    room_number: String,
    priority: String,
    status: String,
    student_name: String,
    contact: String,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
}

pub struct SqliteComplaintRepository {
    pool: SqlitePool,
}

impl SqliteComplaintRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_complaint(row: ComplaintRow) -> Result<Complaint> {
        Ok(Complaint {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            description: row.description,
            category: row.category,
            room_number: row.room_number,
            priority: row.priority,
            status: row.status.parse::<ComplaintStatus>().map_err(AppError::Database)?,
            student_name: row.student_name,
            contact: row.contact,
            date: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: row.updated_at.map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
        })
    }
}

#[async_trait]
impl ComplaintRepository for SqliteComplaintRepository {
    async fn create(&self, complaint: NewComplaint) -> Result<Complaint> {
        let id = Uuid::new_v4();
        let priority = complaint.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string());
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO complaints (
                id, title, description, category, room_number, priority,
                status, student_name, contact, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&complaint.title)
        .bind(&complaint.description)
        .bind(&complaint.category)
        .bind(complaint.room_number.unwrap_or_default())
        .bind(&priority)
        .bind(ComplaintStatus::Pending.as_str())
        .bind(complaint.student_name.unwrap_or_default())
        .bind(complaint.contact.unwrap_or_default())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created complaint".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>> {
        let row = sqlx::query_as::<_, ComplaintRow>(
            r#"
            SELECT id, title, description, category, room_number, priority,
                   status, student_name, contact, created_at, updated_at
            FROM complaints
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_complaint).transpose()
    }

    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Complaint>> {
        let rows = sqlx::query_as::<_, ComplaintRow>(
            r#"
            SELECT id, title, description, category, room_number, priority,
                   status, student_name, contact, created_at, updated_at
            FROM complaints
            WHERE (?1 IS NULL OR category = ?1)
            ORDER BY created_at DESC, rowid DESC
            "#
        )
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_complaint)
            .collect()
    }

    async fn update_status(&self, id: Uuid, status: ComplaintStatus) -> Result<Complaint> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE complaints
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(status.as_str())
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Complaint not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated complaint".to_string())
        })
    }
}
