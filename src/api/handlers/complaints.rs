use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{
        extract::ValidatedJson,
        handlers::{non_blank, CreatedResponse, SuccessResponse},
        state::AppState,
    },
    domain::{CategoryFilter, Complaint, ComplaintStatus, NewComplaint},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    pub room_number: Option<String>,
    pub priority: Option<String>,
    pub student_name: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateComplaintStatusRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: String,
    pub status: ComplaintStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListComplaintsQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListComplaintsQuery>,
) -> Result<Json<Vec<Complaint>>> {
    let filter = CategoryFilter { category: non_blank(params.category) };
    let complaints = state.service_context.complaint_repo.list(&filter).await?;

    Ok(Json(complaints))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Complaint>> {
    let complaint = state.service_context.complaint_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Complaint not found".to_string()))?;

    Ok(Json(complaint))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateComplaintRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let complaint = state.service_context.complaint_repo
        .create(NewComplaint {
            title: request.title,
            description: request.description,
            category: request.category,
            room_number: request.room_number,
            priority: request.priority,
            student_name: request.student_name,
            contact: request.contact,
        })
        .await?;

    tracing::info!("Created complaint {} ({})", complaint.id, complaint.priority);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(complaint.id))))
}

pub async fn update_status(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateComplaintStatusRequest>,
) -> Result<Json<SuccessResponse>> {
    let id = Uuid::parse_str(&request.id)
        .map_err(|_| AppError::BadRequest(format!("id: '{}' is not a valid identifier", request.id)))?;

    let complaint = state.service_context.complaint_repo
        .update_status(id, request.status)
        .await?;

    tracing::info!("Complaint {} is now {}", complaint.id, complaint.status);

    Ok(Json(SuccessResponse::ok()))
}
