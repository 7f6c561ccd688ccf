pub mod poll_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::repository::*;
use poll_service::PollService;

/// Everything a request handler needs, built once at startup around a
/// single pool handle.
pub struct ServiceContext {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub lost_found_repo: Arc<dyn LostFoundRepository>,
    pub timetable_repo: Arc<dyn TimetableRepository>,
    pub complaint_repo: Arc<dyn ComplaintRepository>,
    pub skill_repo: Arc<dyn SkillRepository>,
    pub news_repo: Arc<dyn NewsRepository>,
    pub poll_repo: Arc<dyn PollRepository>,
    pub poll_service: Arc<PollService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool) -> Self {
        let poll_repo: Arc<dyn PollRepository> = Arc::new(SqlitePollRepository::new(db_pool.clone()));
        let poll_service = Arc::new(PollService::new(poll_repo.clone()));

        Self {
            announcement_repo: Arc::new(SqliteAnnouncementRepository::new(db_pool.clone())),
            lost_found_repo: Arc::new(SqliteLostFoundRepository::new(db_pool.clone())),
            timetable_repo: Arc::new(SqliteTimetableRepository::new(db_pool.clone())),
            complaint_repo: Arc::new(SqliteComplaintRepository::new(db_pool.clone())),
            skill_repo: Arc::new(SqliteSkillRepository::new(db_pool.clone())),
            news_repo: Arc::new(SqliteNewsRepository::new(db_pool.clone())),
            poll_repo,
            poll_service,
            db_pool,
        }
    }
}
