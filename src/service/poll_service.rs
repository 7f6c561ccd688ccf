use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{Poll, VoteOutcome},
    error::{AppError, Result},
    repository::PollRepository,
};

pub struct PollService {
    repo: Arc<dyn PollRepository>,
}

impl PollService {
    pub fn new(repo: Arc<dyn PollRepository>) -> Self {
        Self { repo }
    }

    /// Cast `voter_id`'s vote for `option` on a poll.
    ///
    /// A voter gets one vote per poll. A repeat attempt, including one racing
    /// the first, comes back as `AlreadyVoted` and changes nothing.
    pub async fn cast_vote(&self, poll_id: Uuid, option: &str, voter_id: &str) -> Result<VoteOutcome> {
        let poll = self.repo
            .find_by_id(poll_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

        Self::ensure_declared_option(&poll, option)?;

        let outcome = self.repo.record_vote(poll_id, voter_id, option).await?;
        match outcome {
            VoteOutcome::Recorded => {
                tracing::info!("Vote recorded on poll {} for option {:?}", poll_id, option);
            }
            VoteOutcome::AlreadyVoted => {
                tracing::debug!("Voter {} already voted on poll {}", voter_id, poll_id);
            }
        }

        Ok(outcome)
    }

    fn ensure_declared_option(poll: &Poll, option: &str) -> Result<()> {
        if poll.has_option(option) {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "option: '{}' is not one of this poll's options",
                option
            )))
        }
    }
}
