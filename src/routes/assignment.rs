use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::assignment::{PostAssignmentRequest, SubmitAssignmentRequest},
    services::assignment::AssignmentService,
    AppState,
};

pub async fn post(
    State(state): State<AppState>,
    Json(req): Json<PostAssignmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let assignment = AssignmentService::post(&state.db, &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Assignment posted successfully!",
            "assignment": assignment,
        })),
    ))
}

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitAssignmentRequest>,
) -> Result<Json<Value>, AppError> {
    let submission = AssignmentService::submit(&state.db, &req).await?;
    Ok(Json(json!({
        "message": "Assignment submitted successfully!",
        "submission": submission,
    })))
}

/// Teacher listing for one (class, subject), newest first.
pub async fn by_class_and_subject(
    State(state): State<AppState>,
    Path((class_id, subject_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let assignments =
        AssignmentService::by_class_and_subject(&state.db, class_id, subject_id).await?;
    Ok(Json(json!(assignments)))
}

pub async fn submissions(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let submissions = AssignmentService::submissions(&state.db, assignment_id).await?;
    Ok(Json(json!(submissions)))
}
