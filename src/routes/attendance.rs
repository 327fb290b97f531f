use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        attendance::{MarkAttendanceRequest, StudentAttendanceRequest},
        student::RemoveSubjectAttendanceRequest,
    },
    services::attendance::AttendanceService,
    AppState,
};

/// Take a (class, subject, day) roster in one batch.
pub async fn mark_batch(
    State(state): State<AppState>,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<Json<Value>, AppError> {
    AttendanceService::mark_batch(&state.db, &req).await?;
    Ok(Json(json!({ "message": "Attendance marked successfully" })))
}

pub async fn by_date(
    State(state): State<AppState>,
    Path((class_id, subject_id, date)): Path<(Uuid, Uuid, NaiveDate)>,
) -> Result<Json<Value>, AppError> {
    let view = AttendanceService::by_date(&state.db, class_id, subject_id, date).await?;
    Ok(Json(json!(view)))
}

pub async fn percentage(
    State(state): State<AppState>,
    Path((student_id, subject_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let pct = AttendanceService::percentage(&state.db, student_id, subject_id).await?;
    Ok(Json(json!({
        "message": "Attendance percentage fetched successfully",
        "total_classes": pct.total_classes,
        "present_classes": pct.present_classes,
        "percentage": pct.percentage,
    })))
}

pub async fn mark_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(req): Json<StudentAttendanceRequest>,
) -> Result<Json<Value>, AppError> {
    AttendanceService::mark_student(&state.db, student_id, &req).await?;
    Ok(Json(json!({ "message": "Attendance marked successfully" })))
}

pub async fn clear_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = AttendanceService::clear_student(&state.db, student_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

pub async fn clear_student_subject(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(req): Json<RemoveSubjectAttendanceRequest>,
) -> Result<Json<Value>, AppError> {
    let deleted =
        AttendanceService::clear_student_subject(&state.db, student_id, req.subject_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

/// School-wide reset of every student's attendance.
pub async fn clear_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = AttendanceService::clear_school(&state.db, school_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

/// School-wide removal of one subject's records.
pub async fn clear_subject(
    State(state): State<AppState>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = AttendanceService::clear_subject(&state.db, subject_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}
