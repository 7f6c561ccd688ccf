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
    domain::{ItemKind, LostFoundFilter, LostFoundItem, NewLostFoundItem},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLostFoundRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub location: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub contact: String,
}

#[derive(Debug, Deserialize)]
pub struct ListLostFoundQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListLostFoundQuery>,
) -> Result<Json<Vec<LostFoundItem>>> {
    let kind = non_blank(params.kind)
        .map(|k| k.parse::<ItemKind>())
        .transpose()
        .map_err(|e| AppError::Validation(format!("type: {}", e)))?;

    let filter = LostFoundFilter {
        category: non_blank(params.category),
        kind,
    };
    let items = state.service_context.lost_found_repo.list(&filter).await?;

    Ok(Json(items))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LostFoundItem>> {
    let item = state.service_context.lost_found_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Lost & found item not found".to_string()))?;

    Ok(Json(item))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateLostFoundRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let item = state.service_context.lost_found_repo
        .create(NewLostFoundItem {
            title: request.title,
            description: request.description,
            category: request.category,
            kind: request.kind,
            location: request.location,
            contact: request.contact,
        })
        .await?;

    tracing::info!("Created {} item {}", item.kind, item.id);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(item.id))))
}
