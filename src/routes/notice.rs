use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::notice::{CreateNoticeRequest, UpdateNoticeRequest},
    services::notice::NoticeService,
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let notice = NoticeService::create(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(json!(notice))))
}

pub async fn list(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let notices = NoticeService::list(&state.db, school_id).await?;
    Ok(Json(json!(notices)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoticeRequest>,
) -> Result<Json<Value>, AppError> {
    let notice = NoticeService::update(&state.db, id, &req).await?;
    Ok(Json(json!(notice)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let notice = NoticeService::delete(&state.db, id).await?;
    Ok(Json(json!(notice)))
}

pub async fn delete_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = NoticeService::delete_by_school(&state.db, school_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}
