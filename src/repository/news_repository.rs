use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{CategoryFilter, NewNewsItem, NewsItem, DEFAULT_AUTHOR},
    error::{AppError, Result},
    repository::NewsRepository,
};

#[derive(FromRow)]
struct NewsRow {
    id: String,
    title: String,
    content: String,
    category: String,
    author: String,
    url: String,
    created_at: NaiveDateTime,
}

pub struct SqliteNewsRepository {
    pool: SqlitePool,
}

impl SqliteNewsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_news(row: NewsRow) -> Result<NewsItem> {
        Ok(NewsItem {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            content: row.content,
            category: row.category,
            author: row.author,
            url: row.url,
            date: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl NewsRepository for SqliteNewsRepository {
    async fn create(&self, item: NewNewsItem) -> Result<NewsItem> {
        let id = Uuid::new_v4();
        let author = item.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO news (id, title, content, category, author, url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&item.title)
        .bind(&item.content)
        .bind(&item.category)
        .bind(&author)
        .bind(item.url.unwrap_or_default())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created news item".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewsItem>> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, title, content, category, author, url, created_at
            FROM news
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_news).transpose()
    }

    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<NewsItem>> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, title, content, category, author, url, created_at
            FROM news
            WHERE (?1 IS NULL OR category = ?1)
            ORDER BY created_at DESC, rowid DESC
            "#
        )
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_news)
            .collect()
    }
}
