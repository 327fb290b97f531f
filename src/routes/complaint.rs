use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError, models::complaint::CreateComplaintRequest,
    services::complaint::ComplaintService, AppState,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateComplaintRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let complaint = ComplaintService::create(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(json!(complaint))))
}

pub async fn list(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let complaints = ComplaintService::list(&state.db, school_id).await?;
    Ok(Json(json!(complaints)))
}
