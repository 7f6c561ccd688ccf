use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub url: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNewsItem {
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: Option<String>,
    pub url: Option<String>,
}
