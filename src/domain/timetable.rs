use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "default";
pub const DEFAULT_ENTRY_DURATION: &str = "60";

/// One class slot in a user's week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: String,
    pub time: String,
    pub subject: String,
    pub room: String,
    #[serde(default)]
    pub professor: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_duration() -> String {
    DEFAULT_ENTRY_DURATION.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    pub user_id: String,
    pub schedule: Vec<ScheduleEntry>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Timetable {
    /// What a user without a stored timetable sees.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            schedule: Vec::new(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_fills_optional_fields() {
        let entry: ScheduleEntry = serde_json::from_str(
            r#"{"day":"Monday","time":"09:00","subject":"Algorithms","room":"B-204"}"#,
        )
        .unwrap();
        assert_eq!(entry.professor, "");
        assert_eq!(entry.duration, "60");
        assert_eq!(entry.notes, "");
        assert!(entry.created_at.is_none());
    }
}
