use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    api::{extract::ValidatedJson, handlers::{non_blank, SuccessResponse}, state::AppState},
    domain::{ScheduleEntry, Timetable, DEFAULT_ENTRY_DURATION, DEFAULT_USER_ID},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct TimetableQuery {
    pub user_id: Option<String>,
}

/// Either a whole `schedule` (replace) or the fields of a single entry
/// (append). `schedule` wins when both are present.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveTimetableRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_id: String,
    pub schedule: Option<Vec<ScheduleEntryInput>>,
    pub day: Option<String>,
    pub time: Option<String>,
    pub subject: Option<String>,
    pub room: Option<String>,
    pub professor: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleEntryInput {
    pub day: String,
    pub time: String,
    pub subject: String,
    pub room: String,
    #[serde(default)]
    pub professor: String,
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
}

pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<TimetableQuery>,
) -> Result<Json<Timetable>> {
    let user_id = non_blank(params.user_id).unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    let timetable = state.service_context.timetable_repo
        .find_by_user(&user_id)
        .await?
        .unwrap_or_else(|| Timetable::empty(user_id));

    Ok(Json(timetable))
}

pub async fn save(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveTimetableRequest>,
) -> Result<Json<SuccessResponse>> {
    let repo = &state.service_context.timetable_repo;

    match request.schedule {
        Some(entries) => {
            let schedule = entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| schedule_entry(i, entry))
                .collect::<Result<Vec<_>>>()?;

            let timetable = repo.replace_schedule(&request.user_id, schedule).await?;
            tracing::info!(
                "Replaced timetable for {} ({} entries)",
                timetable.user_id,
                timetable.schedule.len()
            );
        }
        None => {
            let entry = ScheduleEntry {
                day: required(request.day, "day")?,
                time: required(request.time, "time")?,
                subject: required(request.subject, "subject")?,
                room: required(request.room, "room")?,
                professor: request.professor.unwrap_or_default(),
                duration: request.duration.unwrap_or_else(|| DEFAULT_ENTRY_DURATION.to_string()),
                notes: request.notes.unwrap_or_default(),
                created_at: None,
            };

            let timetable = repo.append_schedule_item(&request.user_id, entry).await?;
            tracing::info!(
                "Appended timetable entry for {} (now {} entries)",
                timetable.user_id,
                timetable.schedule.len()
            );
        }
    }

    Ok(Json(SuccessResponse::ok()))
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "{}: is required when no schedule is given",
            field
        ))),
    }
}

fn schedule_entry(index: usize, input: ScheduleEntryInput) -> Result<ScheduleEntry> {
    for (field, value) in [
        ("day", &input.day),
        ("time", &input.time),
        ("subject", &input.subject),
        ("room", &input.room),
    ] {
        if value.is_empty() {
            return Err(AppError::Validation(format!(
                "schedule[{}].{}: must not be empty",
                index, field
            )));
        }
    }

    Ok(ScheduleEntry {
        day: input.day,
        time: input.time,
        subject: input.subject,
        room: input.room,
        professor: input.professor,
        duration: input.duration.unwrap_or_else(|| DEFAULT_ENTRY_DURATION.to_string()),
        notes: input.notes,
        created_at: input.created_at,
    })
}
