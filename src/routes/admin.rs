use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::admin::{AdminLoginRequest, FeeCollectionResponse, RegisterAdminRequest},
    services::admin::AdminService,
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterAdminRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if req.email.is_empty() || req.password.is_empty() || req.school_name.is_empty() {
        return Err(AppError::Validation(
            "School name, email and password are required".into(),
        ));
    }
    let admin = AdminService::register(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(json!(admin))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<Value>, AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".into(),
        ));
    }
    let admin = AdminService::login(&state.db, &req).await?;
    Ok(Json(json!(admin)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let admin = AdminService::detail(&state.db, id).await?;
    Ok(Json(json!(admin)))
}

pub async fn fee_collection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FeeCollectionResponse>, AppError> {
    let total_collections = AdminService::fee_collection(&state.db, id).await?;
    Ok(Json(FeeCollectionResponse {
        total_collections,
        message: "Fee collection calculated successfully".into(),
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let admin = AdminService::delete(&state.db, id).await?;
    Ok(Json(json!(admin)))
}
