use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::sclass::CreateSclassRequest,
    services::{sclass::SclassService, student::StudentService},
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateSclassRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let sclass = SclassService::create(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(json!(sclass))))
}

pub async fn list(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let classes = SclassService::list(&state.db, school_id).await?;
    Ok(Json(json!(classes)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let sclass = SclassService::detail(&state.db, id).await?;
    Ok(Json(json!(sclass)))
}

pub async fn students(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let students = StudentService::list_by_class(&state.db, id).await?;
    Ok(Json(json!(students)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let sclass = SclassService::delete(&state.db, id).await?;
    Ok(Json(json!(sclass)))
}

pub async fn delete_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = SclassService::delete_by_school(&state.db, school_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}
