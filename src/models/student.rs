use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::attendance::AttendanceRecordDetail;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub roll_num: i32,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub sclass_id: Uuid,
    pub school_id: Uuid,
    pub parent_email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Student row with the class name joined in, for school-wide listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentSummary {
    pub id: Uuid,
    pub name: String,
    pub roll_num: i32,
    pub sclass_id: Uuid,
    pub sclass_name: String,
    pub school_id: Uuid,
    pub parent_email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExamResultDetail {
    pub subject_id: Uuid,
    pub sub_name: String,
    pub marks_obtained: i32,
}

/// Full student view: names populated, ledgers attached.
#[derive(Debug, Serialize)]
pub struct StudentDetail {
    pub id: Uuid,
    pub name: String,
    pub roll_num: i32,
    pub sclass_id: Uuid,
    pub sclass_name: String,
    pub school_id: Uuid,
    pub school_name: String,
    pub parent_email: String,
    pub role: String,
    pub exam_results: Vec<ExamResultDetail>,
    pub attendance: Vec<AttendanceRecordDetail>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub roll_num: i32,
    pub password: String,
    pub sclass_id: Uuid,
    pub school_id: Uuid,
    pub parent_email: String,
}

/// Students sign in with roll number + name rather than an email.
#[derive(Debug, Deserialize)]
pub struct StudentLoginRequest {
    pub roll_num: i32,
    pub student_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub roll_num: Option<i32>,
    pub password: Option<String>,
    pub sclass_id: Option<Uuid>,
    pub parent_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExamResultRequest {
    pub subject_id: Uuid,
    pub marks_obtained: i32,
}

#[derive(Debug, Deserialize)]
pub struct RemoveSubjectAttendanceRequest {
    pub subject_id: Uuid,
}
