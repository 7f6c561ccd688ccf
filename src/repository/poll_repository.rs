use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{tally, Ballot, NewPoll, Poll, VoteOutcome, DEFAULT_AUTHOR, POLL_ACTIVE},
    error::{AppError, Result},
    repository::PollRepository,
};

#[derive(FromRow)]
struct PollRow {
    id: String,
    question: String,
    options: String,
    author: String,
    status: String,
    created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct BallotRow {
    poll_id: String,
    voter_id: String,
    choice: String,
}

/// Polls live in `polls`; each vote is a `poll_votes` row keyed by
/// (poll_id, voter_id). Counts are computed from the ballots on read.
pub struct SqlitePollRepository {
    pool: SqlitePool,
}

impl SqlitePollRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_poll(row: PollRow, ballots: &[Ballot]) -> Result<Poll> {
        let options: Vec<String> = serde_json::from_str(&row.options)
            .map_err(|e| AppError::Database(format!("Corrupt options for poll {}: {}", row.id, e)))?;
        let (votes, voters) = tally(&options, ballots);

        Ok(Poll {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            question: row.question,
            options,
            votes,
            voters,
            author: row.author,
            status: row.status,
            date: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    async fn ballots_for(&self, poll_id: &str) -> Result<Vec<Ballot>> {
        let rows = sqlx::query_as::<_, BallotRow>(
            r#"
            SELECT poll_id, voter_id, choice
            FROM poll_votes
            WHERE poll_id = ?
            ORDER BY voted_at ASC, rowid ASC
            "#
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter()
            .map(|r| Ballot { voter_id: r.voter_id, option: r.choice })
            .collect())
    }
}

#[async_trait]
impl PollRepository for SqlitePollRepository {
    async fn create(&self, poll: NewPoll) -> Result<Poll> {
        let id = Uuid::new_v4();
        let options_json = serde_json::to_string(&poll.options)?;
        let author = poll.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO polls (id, question, options, author, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&poll.question)
        .bind(&options_json)
        .bind(&author)
        .bind(POLL_ACTIVE)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created poll".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Poll>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, PollRow>(
            r#"
            SELECT id, question, options, author, status, created_at
            FROM polls
            WHERE id = ?
            "#
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => {
                let ballots = self.ballots_for(&id_str).await?;
                Ok(Some(Self::row_to_poll(r, &ballots)?))
            }
            None => Ok(None)
        }
    }

    async fn list(&self) -> Result<Vec<Poll>> {
        let rows = sqlx::query_as::<_, PollRow>(
            r#"
            SELECT id, question, options, author, status, created_at
            FROM polls
            ORDER BY created_at DESC, rowid DESC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let ballot_rows = sqlx::query_as::<_, BallotRow>(
            r#"
            SELECT poll_id, voter_id, choice
            FROM poll_votes
            ORDER BY voted_at ASC, rowid ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let mut ballots: HashMap<String, Vec<Ballot>> = HashMap::new();
        for r in ballot_rows {
            ballots.entry(r.poll_id).or_default().push(Ballot {
                voter_id: r.voter_id,
                option: r.choice,
            });
        }

        rows.into_iter()
            .map(|row| {
                let poll_ballots = ballots.remove(&row.id).unwrap_or_default();
                Self::row_to_poll(row, &poll_ballots)
            })
            .collect()
    }

    async fn record_vote(&self, poll_id: Uuid, voter_id: &str, option: &str) -> Result<VoteOutcome> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO poll_votes (poll_id, voter_id, choice, voted_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (poll_id, voter_id) DO NOTHING
            "#
        )
        .bind(poll_id.to_string())
        .bind(voter_id)
        .bind(option)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            Ok(VoteOutcome::AlreadyVoted)
        } else {
            Ok(VoteOutcome::Recorded)
        }
    }
}
