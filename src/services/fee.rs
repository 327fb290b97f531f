use chrono::{Datelike, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::fee::{CreateOrderRequest, Fee, FeeDetailsResponse, PayFeeRequest, MONTHS},
    services::payment::PaymentGateway,
};

pub struct FeeService;

impl FeeService {
    /// Fetch a student's fee schedule. A student with no entries gets twelve
    /// monthly entries for the current year materialized on this first read.
    pub async fn get_details(
        pool: &PgPool,
        student_id: Uuid,
        default_amount: i64,
    ) -> Result<FeeDetailsResponse, AppError> {
        let student: Option<(String, i32)> =
            sqlx::query_as("SELECT name, roll_num FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(pool)
                .await?;
        let (name, roll_num) = student.ok_or_else(|| AppError::not_found("Student"))?;

        let mut fees = Self::fetch_fees(pool, student_id).await?;
        if fees.is_empty() {
            let year = Utc::now().year();
            let mut tx = pool.begin().await?;
            for month in MONTHS {
                // ON CONFLICT guards against a concurrent first read.
                sqlx::query(
                    "INSERT INTO fees (student_id, month, year, amount)
                     VALUES ($1, $2, $3, $4)
                     ON CONFLICT (student_id, month, year) DO NOTHING",
                )
                .bind(student_id)
                .bind(month)
                .bind(year)
                .bind(default_amount)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
            fees = Self::fetch_fees(pool, student_id).await?;
        }

        Ok(FeeDetailsResponse {
            student: name,
            roll_num,
            fees,
        })
    }

    /// Ask the gateway for an order covering one month's fee. No local state
    /// changes here; the order stays provisional until `pay` confirms it.
    pub async fn create_order(
        pool: &PgPool,
        gateway: &PaymentGateway,
        req: &CreateOrderRequest,
    ) -> Result<String, AppError> {
        let fee = Self::find_fee(pool, req.student_id, &req.month).await?;
        if fee.is_paid {
            return Err(AppError::Conflict("Fee is already paid".into()));
        }

        let receipt = format!("order-{}-{}", req.student_id, req.month);
        gateway.create_order(req.amount, &receipt).await
    }

    /// Confirm a payment: recompute the gateway signature server-side and
    /// only then flip the entry to paid. The UPDATE keeps the is_paid guard
    /// so two racing confirmations cannot both settle.
    pub async fn pay(
        pool: &PgPool,
        gateway: &PaymentGateway,
        req: &PayFeeRequest,
    ) -> Result<Fee, AppError> {
        let fee = Self::find_fee(pool, req.student_id, &req.month).await?;
        if fee.is_paid {
            return Err(AppError::Conflict("Fee is already paid".into()));
        }

        if !gateway.verify_signature(&req.order_id, &req.payment_id, &req.signature) {
            return Err(AppError::Validation("Payment verification failed".into()));
        }

        let paid = sqlx::query_as::<_, Fee>(
            "UPDATE fees SET is_paid = TRUE, paid_date = NOW()
             WHERE id = $1 AND NOT is_paid
             RETURNING *",
        )
        .bind(fee.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::Conflict("Fee is already paid".into()))?;
        Ok(paid)
    }

    async fn fetch_fees(pool: &PgPool, student_id: Uuid) -> Result<Vec<Fee>, AppError> {
        let fees = sqlx::query_as::<_, Fee>(
            "SELECT * FROM fees WHERE student_id = $1
             ORDER BY year,
                      array_position(ARRAY['January','February','March','April','May','June',
                                           'July','August','September','October','November','December'],
                                     month)",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(fees)
    }

    /// Entry for the named month, latest year first, mirroring a schedule
    /// that only ever holds the current year.
    async fn find_fee(pool: &PgPool, student_id: Uuid, month: &str) -> Result<Fee, AppError> {
        let student_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(student_id)
                .fetch_one(pool)
                .await?;
        if !student_exists {
            return Err(AppError::not_found("Student"));
        }

        sqlx::query_as::<_, Fee>(
            "SELECT * FROM fees WHERE student_id = $1 AND month = $2
             ORDER BY year DESC LIMIT 1",
        )
        .bind(student_id)
        .bind(month)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Fee record not found for the specified month".into()))
    }
}
