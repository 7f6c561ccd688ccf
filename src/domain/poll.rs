use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const POLL_ACTIVE: &str = "active";
pub const ANONYMOUS_VOTER: &str = "anonymous";

/// A poll as clients see it.
///
/// `votes` and `voters` are derived from the recorded ballots, so every
/// declared option has a count (possibly zero) and the counts always sum to
/// `voters.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub votes: BTreeMap<String, i64>,
    pub voters: Vec<String>,
    pub author: String,
    pub status: String,
    pub date: DateTime<Utc>,
}

impl Poll {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn total_votes(&self) -> i64 {
        self.votes.values().sum()
    }
}

#[derive(Debug, Clone)]
pub struct NewPoll {
    pub question: String,
    pub options: Vec<String>,
    pub author: Option<String>,
}

/// A single recorded vote, in the order it was cast.
#[derive(Debug, Clone)]
pub struct Ballot {
    pub voter_id: String,
    pub option: String,
}

/// Result of a vote attempt that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded,
    AlreadyVoted,
}

/// Zero-initialises a count per option and folds the ballots in.
pub fn tally(options: &[String], ballots: &[Ballot]) -> (BTreeMap<String, i64>, Vec<String>) {
    let mut votes: BTreeMap<String, i64> = options.iter().map(|o| (o.clone(), 0)).collect();
    let mut voters = Vec::with_capacity(ballots.len());

    for ballot in ballots {
        *votes.entry(ballot.option.clone()).or_insert(0) += 1;
        voters.push(ballot.voter_id.clone());
    }

    (votes, voters)
}
