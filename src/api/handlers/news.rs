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
    domain::{CategoryFilter, NewNewsItem, NewsItem},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    pub author: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListNewsQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListNewsQuery>,
) -> Result<Json<Vec<NewsItem>>> {
    let filter = CategoryFilter { category: non_blank(params.category) };
    let news = state.service_context.news_repo.list(&filter).await?;

    Ok(Json(news))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsItem>> {
    let item = state.service_context.news_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("News item not found".to_string()))?;

    Ok(Json(item))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateNewsRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let item = state.service_context.news_repo
        .create(NewNewsItem {
            title: request.title,
            content: request.content,
            category: request.category,
            author: request.author,
            url: request.url,
        })
        .await?;

    tracing::info!("Created news item {}", item.id);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(item.id))))
}
