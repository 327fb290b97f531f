use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub sclass_id: Uuid,
    pub subject_id: Uuid,
    pub deadline: DateTime<Utc>,
    pub description: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

/// Student-facing projection: submissions stay hidden.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssignmentBrief {
    pub id: Uuid,
    pub deadline: DateTime<Utc>,
    pub description: String,
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub name: String,
    pub roll_num: i32,
    pub file_url: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PostAssignmentRequest {
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub deadline: DateTime<Utc>,
    pub description: String,
    pub file_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAssignmentRequest {
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub name: String,
    pub roll_num: i32,
    pub file: String,
}

