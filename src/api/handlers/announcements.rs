use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{extract::ValidatedJson, handlers::{non_blank, CreatedResponse}, state::AppState},
    domain::{Announcement, CategoryFilter, NewAnnouncement},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListAnnouncementsQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAnnouncementsQuery>,
) -> Result<Json<Vec<Announcement>>> {
    let filter = CategoryFilter { category: non_blank(params.category) };
    let announcements = state.service_context.announcement_repo.list(&filter).await?;

    Ok(Json(announcements))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>> {
    let announcement = state.service_context.announcement_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    Ok(Json(announcement))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let announcement = state.service_context.announcement_repo
        .create(NewAnnouncement {
            title: request.title,
            content: request.content,
            category: request.category,
            author: request.author,
        })
        .await?;

    tracing::info!("Created announcement {}", announcement.id);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(announcement.id))))
}
