use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        attendance::TeacherAttendanceRequest,
        teacher::{
            ComplaintMailRequest, RegisterTeacherRequest, TeacherLoginRequest,
            UpdateTeacherSubjectRequest,
        },
    },
    services::{mail::MailService, teacher::TeacherService},
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterTeacherRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let teacher = TeacherService::register(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(json!(teacher))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<TeacherLoginRequest>,
) -> Result<Json<Value>, AppError> {
    let teacher = TeacherService::login(&state.db, &req).await?;
    Ok(Json(json!(teacher)))
}

pub async fn list_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let teachers = TeacherService::list_by_school(&state.db, school_id).await?;
    Ok(Json(json!(teachers)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let teacher = TeacherService::detail(&state.db, id).await?;
    Ok(Json(json!(teacher)))
}

pub async fn update_subject(
    State(state): State<AppState>,
    Json(req): Json<UpdateTeacherSubjectRequest>,
) -> Result<Json<Value>, AppError> {
    let teacher = TeacherService::update_subject(&state.db, &req).await?;
    Ok(Json(json!(teacher)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let teacher = TeacherService::delete(&state.db, id).await?;
    Ok(Json(json!(teacher)))
}

pub async fn delete_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = TeacherService::delete_by_school(&state.db, school_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

pub async fn delete_by_class(
    State(state): State<AppState>,
    Path(sclass_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = TeacherService::delete_by_class(&state.db, sclass_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TeacherAttendanceRequest>,
) -> Result<Json<Value>, AppError> {
    let attendance = TeacherService::mark_attendance(&state.db, id, &req).await?;
    Ok(Json(json!({ "attendance": attendance })))
}

pub async fn send_complaint(
    State(state): State<AppState>,
    Json(req): Json<ComplaintMailRequest>,
) -> Result<Json<Value>, AppError> {
    MailService::send_complaint(&state.db, &state.config.smtp_relay, &req).await?;
    Ok(Json(json!({ "message": "Complaint email sent successfully" })))
}
