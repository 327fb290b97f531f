use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::student::{
        ExamResultRequest, RegisterStudentRequest, StudentLoginRequest, UpdateStudentRequest,
    },
    services::{assignment::AssignmentService, student::StudentService},
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let student = StudentService::register(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(json!(student))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<StudentLoginRequest>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::login(&state.db, &req).await?;
    Ok(Json(json!(student)))
}

pub async fn list_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let students = StudentService::list_by_school(&state.db, school_id).await?;
    Ok(Json(json!(students)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::detail(&state.db, id).await?;
    Ok(Json(json!(student)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::update(&state.db, id, &req).await?;
    Ok(Json(json!(student)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::delete(&state.db, id).await?;
    Ok(Json(json!(student)))
}

pub async fn delete_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = StudentService::delete_by_school(&state.db, school_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

pub async fn delete_by_class(
    State(state): State<AppState>,
    Path(sclass_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = StudentService::delete_by_class(&state.db, sclass_id).await?;
    Ok(Json(json!({ "deleted_count": deleted })))
}

pub async fn update_exam_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ExamResultRequest>,
) -> Result<Json<Value>, AppError> {
    StudentService::update_exam_result(&state.db, id, &req).await?;
    let student = StudentService::detail(&state.db, id).await?;
    Ok(Json(json!(student)))
}

/// All assignments for the student's class, submissions hidden.
pub async fn all_assignments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::detail(&state.db, id).await?;
    let assignments = AssignmentService::briefs_for_class(&state.db, student.sclass_id).await?;
    Ok(Json(json!({
        "message": "All Assignments fetched successfully",
        "total_assignments": assignments.len(),
        "assignments": assignments,
    })))
}

pub async fn subject_assignments(
    State(state): State<AppState>,
    Path((id, subject_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::detail(&state.db, id).await?;
    let assignments =
        AssignmentService::briefs_for_class_and_subject(&state.db, student.sclass_id, subject_id)
            .await?;
    if assignments.is_empty() {
        return Err(AppError::NotFound(
            "No assignments found for this subject".into(),
        ));
    }
    Ok(Json(json!({ "assignments": assignments })))
}
