use std::borrow::Cow;
use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    api::{
        extract::ValidatedJson,
        handlers::{CreatedResponse, SuccessResponse},
        state::AppState,
    },
    domain::{NewPoll, Poll, VoteOutcome, ANONYMOUS_VOTER},
    error::{AppError, Result},
};

pub const ALREADY_VOTED: &str = "Already voted";

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePollRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub question: String,
    #[validate(
        length(min = 1, message = "must list at least one option"),
        custom(function = "validate_options")
    )]
    pub options: Vec<String>,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CastVoteRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub poll_id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub option: String,
    #[serde(default = "anonymous_voter")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub voter_id: String,
}

fn anonymous_voter() -> String {
    ANONYMOUS_VOTER.to_string()
}

/// Options become the keys of the vote tally, so they must be non-empty and
/// distinct.
fn validate_options(options: &Vec<String>) -> std::result::Result<(), ValidationError> {
    if options.iter().any(|o| o.is_empty()) {
        return Err(ValidationError::new("empty_option")
            .with_message(Cow::from("options must not be empty strings")));
    }

    let mut seen = HashSet::new();
    if !options.iter().all(|o| seen.insert(o.as_str())) {
        return Err(ValidationError::new("duplicate_option")
            .with_message(Cow::from("options must be distinct")));
    }

    Ok(())
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<Poll>>> {
    let polls = state.service_context.poll_repo.list().await?;

    Ok(Json(polls))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Poll>> {
    let poll = state.service_context.poll_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Poll not found".to_string()))?;

    Ok(Json(poll))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreatePollRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let poll = state.service_context.poll_repo
        .create(NewPoll {
            question: request.question,
            options: request.options,
            author: request.author,
        })
        .await?;

    tracing::info!("Created poll {} with {} options", poll.id, poll.options.len());

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(poll.id))))
}

/// A repeat vote is reported in the body (`success: false`), not as an
/// HTTP error.
pub async fn vote(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CastVoteRequest>,
) -> Result<Json<SuccessResponse>> {
    let poll_id = Uuid::parse_str(&request.poll_id)
        .map_err(|_| AppError::BadRequest(format!("poll_id: '{}' is not a valid identifier", request.poll_id)))?;

    let outcome = state.service_context.poll_service
        .cast_vote(poll_id, &request.option, &request.voter_id)
        .await?;

    let body = match outcome {
        VoteOutcome::Recorded => SuccessResponse::ok(),
        VoteOutcome::AlreadyVoted => SuccessResponse::failed(ALREADY_VOTED),
    };

    Ok(Json(body))
}
