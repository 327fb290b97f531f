use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// App-specific SMTP password used to send complaint mail as this teacher.
    #[serde(skip_serializing)]
    pub app_password: Option<String>,
    pub role: String,
    pub school_id: Uuid,
    pub teach_subject: Option<Uuid>,
    pub teach_sclass: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Teacher with school, class and subject names joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeacherDetail {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub school_id: Uuid,
    pub school_name: String,
    pub teach_sclass: Uuid,
    pub sclass_name: String,
    pub teach_subject: Option<Uuid>,
    pub sub_name: Option<String>,
    pub sessions: Option<i32>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeacherAttendanceEntry {
    pub date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub app_password: Option<String>,
    pub school_id: Uuid,
    pub teach_subject: Option<Uuid>,
    pub teach_sclass: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct TeacherLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeacherSubjectRequest {
    pub teacher_id: Uuid,
    pub teach_subject: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ComplaintMailRequest {
    pub teacher_id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub description: String,
}
