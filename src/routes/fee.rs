use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::fee::{CreateOrderRequest, PayFeeRequest},
    services::fee::FeeService,
    AppState,
};

/// Fee schedule for a student; twelve monthly entries materialize on the
/// first read of an empty schedule.
pub async fn details(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let details =
        FeeService::get_details(&state.db, student_id, state.config.default_fee_amount).await?;
    Ok(Json(json!(details)))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Value>, AppError> {
    let order_id = FeeService::create_order(&state.db, &state.gateway, &req).await?;
    Ok(Json(json!({
        "message": "Order created successfully",
        "order_id": order_id,
    })))
}

pub async fn pay(
    State(state): State<AppState>,
    Json(req): Json<PayFeeRequest>,
) -> Result<Json<Value>, AppError> {
    let fee = FeeService::pay(&state.db, &state.gateway, &req).await?;
    Ok(Json(json!({
        "message": "Fee payment successful",
        "fee": fee,
    })))
}
