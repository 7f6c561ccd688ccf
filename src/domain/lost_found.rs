use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const LISTING_ACTIVE: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(ItemKind::Lost),
            "found" => Ok(ItemKind::Found),
            other => Err(format!("type must be 'lost' or 'found', got '{}'", other)),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostFoundItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub location: String,
    pub contact: String,
    pub status: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLostFoundItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub kind: ItemKind,
    pub location: String,
    pub contact: String,
}

#[derive(Debug, Clone, Default)]
pub struct LostFoundFilter {
    pub category: Option<String>,
    pub kind: Option<ItemKind>,
}
