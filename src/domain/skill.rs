use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_SESSION_DURATION: &str = "1 hour";
pub const DEFAULT_PRICE: &str = "Free";
pub const SKILL_AVAILABLE: &str = "available";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillListing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor: String,
    pub contact: String,
    pub duration: String,
    pub price: String,
    pub status: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSkillListing {
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor: String,
    pub contact: String,
    pub duration: Option<String>,
    pub price: Option<String>,
}
