use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};

use crate::{
    domain::{ScheduleEntry, Timetable},
    error::{AppError, Result},
    repository::TimetableRepository,
};

#[derive(FromRow)]
struct TimetableRow {
    user_id: String,
    schedule: String,
    updated_at: NaiveDateTime,
}

/// Keeps one row per user; the schedule lives in a JSON array column.
pub struct SqliteTimetableRepository {
    pool: SqlitePool,
}

impl SqliteTimetableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_timetable(row: TimetableRow) -> Result<Timetable> {
        let schedule: Vec<ScheduleEntry> = serde_json::from_str(&row.schedule)
            .map_err(|e| AppError::Database(format!("Corrupt schedule for {}: {}", row.user_id, e)))?;

        Ok(Timetable {
            user_id: row.user_id,
            schedule,
            updated_at: Some(DateTime::from_naive_utc_and_offset(row.updated_at, Utc)),
        })
    }

    async fn fetch(&self, user_id: &str) -> Result<Timetable> {
        self.find_by_user(user_id).await?.ok_or_else(|| {
            AppError::Database(format!("Failed to retrieve timetable for {}", user_id))
        })
    }
}

#[async_trait]
impl TimetableRepository for SqliteTimetableRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Timetable>> {
        let row = sqlx::query_as::<_, TimetableRow>(
            r#"
            SELECT user_id, schedule, updated_at
            FROM timetables
            WHERE user_id = ?
            "#
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_timetable).transpose()
    }

    async fn replace_schedule(&self, user_id: &str, schedule: Vec<ScheduleEntry>) -> Result<Timetable> {
        let schedule_json = serde_json::to_string(&schedule)?;
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO timetables (user_id, schedule, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id)
            DO UPDATE SET schedule = excluded.schedule, updated_at = excluded.updated_at
            "#
        )
        .bind(user_id)
        .bind(&schedule_json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.fetch(user_id).await
    }

    async fn append_schedule_item(&self, user_id: &str, mut entry: ScheduleEntry) -> Result<Timetable> {
        let now = Utc::now();
        entry.created_at = Some(now);
        let entry_json = serde_json::to_string(&entry)?;

        // json_insert at '$[#]' appends inside the same upsert, so concurrent
        // appends for one user never lose an entry.
        sqlx::query(
            r#"
            INSERT INTO timetables (user_id, schedule, updated_at)
            VALUES (?1, json_array(json(?2)), ?3)
            ON CONFLICT (user_id)
            DO UPDATE SET schedule = json_insert(timetables.schedule, '$[#]', json(?2)),
                          updated_at = excluded.updated_at
            "#
        )
        .bind(user_id)
        .bind(&entry_json)
        .bind(now.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.fetch(user_id).await
    }
}
