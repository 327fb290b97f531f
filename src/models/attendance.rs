use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Absent with Apology")]
    AbsentWithApology,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::AbsentWithApology => "Absent with Apology",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(AttendanceStatus::Present),
            "Absent" => Ok(AttendanceStatus::Absent),
            "Absent with Apology" => Ok(AttendanceStatus::AbsentWithApology),
            _ => Err(anyhow::anyhow!("Unknown attendance status: {s}")),
        }
    }
}

/// Attendance record with the subject name joined in, for student detail views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttendanceRecordDetail {
    pub subject_id: Uuid,
    pub sub_name: String,
    pub sessions: i32,
    pub date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentStatus {
    pub student_id: Uuid,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub records: Vec<StudentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StudentAttendanceRequest {
    pub subject_id: Uuid,
    pub status: AttendanceStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct TeacherAttendanceRequest {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DateAttendanceEntry {
    pub name: String,
    pub roll_num: i32,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct DateAttendanceView {
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub records: Vec<DateAttendanceEntry>,
}

#[derive(Debug, Serialize)]
pub struct AttendancePercentage {
    pub total_classes: i32,
    pub present_classes: i64,
    /// Two-decimal string, e.g. "83.33".
    pub percentage: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_text() {
        for s in ["Present", "Absent", "Absent with Apology"] {
            assert_eq!(AttendanceStatus::from_str(s).unwrap().to_string(), s);
        }
        assert!(AttendanceStatus::from_str("Late").is_err());
    }

    #[test]
    fn status_serde_uses_spaced_variant() {
        let json = serde_json::to_string(&AttendanceStatus::AbsentWithApology).unwrap();
        assert_eq!(json, "\"Absent with Apology\"");
        let back: AttendanceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AttendanceStatus::AbsentWithApology);
    }
}
