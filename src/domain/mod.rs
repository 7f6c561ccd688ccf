pub mod announcement;
pub mod lost_found;
pub mod timetable;
pub mod complaint;
pub mod skill;
pub mod news;
pub mod poll;

pub use announcement::*;
pub use lost_found::*;
pub use timetable::*;
pub use complaint::*;
pub use skill::*;
pub use news::*;
pub use poll::*;

/// Author recorded when a post does not name one.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Exact-match, case-sensitive category filter. `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

impl CategoryFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self { category: Some(category.into()) }
    }
}
