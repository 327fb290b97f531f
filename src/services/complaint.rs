use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::complaint::{Complaint, ComplaintView, CreateComplaintRequest},
};

pub struct ComplaintService;

impl ComplaintService {
    pub async fn create(pool: &PgPool, req: &CreateComplaintRequest) -> Result<Complaint, AppError> {
        let complaint = sqlx::query_as::<_, Complaint>(
            "INSERT INTO complaints (school_id, user_id, date, complaint)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(req.school_id)
        .bind(req.user_id)
        .bind(req.date)
        .bind(&req.complaint)
        .fetch_one(pool)
        .await?;
        Ok(complaint)
    }

    pub async fn list(pool: &PgPool, school_id: Uuid) -> Result<Vec<ComplaintView>, AppError> {
        let complaints = sqlx::query_as::<_, ComplaintView>(
            "SELECT c.id, c.school_id, c.user_id, s.name AS user_name, c.date, c.complaint
             FROM complaints c
             JOIN students s ON s.id = c.user_id
             WHERE c.school_id = $1
             ORDER BY c.date DESC",
        )
        .bind(school_id)
        .fetch_all(pool)
        .await?;
        if complaints.is_empty() {
            return Err(AppError::NotFound("No complains found".into()));
        }
        Ok(complaints)
    }
}
