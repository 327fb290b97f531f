use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError, models::subject::CreateSubjectsRequest, services::subject::SubjectService,
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateSubjectsRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let subjects = SubjectService::create(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(json!(subjects))))
}

pub async fn all_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let subjects = SubjectService::all_by_school(&state.db, school_id).await?;
    Ok(Json(json!(subjects)))
}

pub async fn by_class(
    State(state): State<AppState>,
    Path(sclass_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let subjects = SubjectService::by_class(&state.db, sclass_id).await?;
    Ok(Json(json!(subjects)))
}

pub async fn free_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let subjects = SubjectService::free_by_school(&state.db, school_id).await?;
    Ok(Json(json!(subjects)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let subject = SubjectService::detail(&state.db, id).await?;
    Ok(Json(json!(subject)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let subject = SubjectService::delete(&state.db, id).await?;
    Ok(Json(json!(subject)))
}

pub async fn delete_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = SubjectService::delete_by_school(&state.db, school_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

pub async fn delete_by_class(
    State(state): State<AppState>,
    Path(sclass_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = SubjectService::delete_by_class(&state.db, sclass_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}
