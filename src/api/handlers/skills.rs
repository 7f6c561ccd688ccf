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
    domain::{CategoryFilter, NewSkillListing, SkillListing},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSkillRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub instructor: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub contact: String,
    pub duration: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListSkillsQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListSkillsQuery>,
) -> Result<Json<Vec<SkillListing>>> {
    let filter = CategoryFilter { category: non_blank(params.category) };
    let skills = state.service_context.skill_repo.list(&filter).await?;

    Ok(Json(skills))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillListing>> {
    let skill = state.service_context.skill_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Skill listing not found".to_string()))?;

    Ok(Json(skill))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSkillRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let skill = state.service_context.skill_repo
        .create(NewSkillListing {
            title: request.title,
            description: request.description,
            category: request.category,
            instructor: request.instructor,
            contact: request.contact,
            duration: request.duration,
            price: request.price,
        })
        .await?;

    tracing::info!("Created skill listing {}", skill.id);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(skill.id))))
}
