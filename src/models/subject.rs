use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: Uuid,
    pub sub_name: String,
    pub sub_code: String,
    /// Declared number of class meetings; attendance denominator and cap.
    pub sessions: i32,
    pub sclass_id: Uuid,
    pub school_id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Subject with its class and teacher names joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SubjectDetail {
    pub id: Uuid,
    pub sub_name: String,
    pub sub_code: String,
    pub sessions: i32,
    pub sclass_id: Uuid,
    pub sclass_name: String,
    pub school_id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub teacher_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewSubject {
    pub sub_name: String,
    pub sub_code: String,
    pub sessions: i32,
}

/// Batch creation request: every subject lands in the same class and school.
#[derive(Debug, Deserialize)]
pub struct CreateSubjectsRequest {
    pub school_id: Uuid,
    pub sclass_id: Uuid,
    pub subjects: Vec<NewSubject>,
}
