use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Complaint {
    pub id: Uuid,
    pub school_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub complaint: String,
    pub created_at: DateTime<Utc>,
}

/// Complaint with the submitting student's name joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ComplaintView {
    pub id: Uuid,
    pub school_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub date: NaiveDate,
    pub complaint: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateComplaintRequest {
    pub school_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub complaint: String,
}
