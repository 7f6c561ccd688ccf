use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::{
    api::state::AppState,
    db,
    error::{AppError, Result},
};

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "CampusLink API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Campus community board: announcements, lost & found, timetables, complaints, skills, news and polls",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "announcements": "/api/announcements",
            "lost_found": "/api/lost-found",
            "timetable": "/api/timetable",
            "complaints": "/api/complaints",
            "skills": "/api/skills",
            "news": "/api/news",
            "polls": "/api/polls"
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse> {
    db::ping(&state.service_context.db_pool)
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("Database unreachable: {}", e)))?;

    Ok((StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))))
}

pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfo {
        name: "CampusLink API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "JSON API for the CampusLink campus community board".to_string(),
        status: "operational".to_string(),
    })
}
