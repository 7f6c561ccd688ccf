use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{ItemKind, LostFoundFilter, LostFoundItem, NewLostFoundItem, LISTING_ACTIVE},
    error::{AppError, Result},
    repository::LostFoundRepository,
};

#[derive(FromRow)]
struct LostFoundRow {
    id: String,
    title: String,
    description: String,
    category: String,
    kind: String,
    location: String,
    contact: String,
    status: String,
    created_at: NaiveDateTime,
}

pub struct SqliteLostFoundRepository {
    pool: SqlitePool,
}

impl SqliteLostFoundRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: LostFoundRow) -> Result<LostFoundItem> {
        Ok(LostFoundItem {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            description: row.description,
            category: row.category,
            kind: row.kind.parse::<ItemKind>().map_err(AppError::Database)?,
            location: row.location,
            contact: row.contact,
            status: row.status,
            date: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl LostFoundRepository for SqliteLostFoundRepository {
    async fn create(&self, item: NewLostFoundItem) -> Result<LostFoundItem> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO lost_found (
                id, title, description, category, kind, location, contact,
                status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.category)
        .bind(item.kind.as_str())
        .bind(&item.location)
        .bind(&item.contact)
        .bind(LISTING_ACTIVE)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created lost & found item".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LostFoundItem>> {
        let row = sqlx::query_as::<_, LostFoundRow>(
            r#"
            SELECT id, title, description, category, kind, location, contact,
                   status, created_at
            FROM lost_found
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_item).transpose()
    }

    async fn list(&self, filter: &LostFoundFilter) -> Result<Vec<LostFoundItem>> {
        let rows = sqlx::query_as::<_, LostFoundRow>(
            r#"
            SELECT id, title, description, category, kind, location, contact,
                   status, created_at
            FROM lost_found
            WHERE (?1 IS NULL OR category = ?1)
              AND (?2 IS NULL OR kind = ?2)
            ORDER BY created_at DESC, rowid DESC
            "#
        )
        .bind(filter.category.as_deref())
        .bind(filter.kind.map(|k| k.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_item)
            .collect()
    }
}
