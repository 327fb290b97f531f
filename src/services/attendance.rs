use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::attendance::{
        AttendancePercentage, DateAttendanceEntry, DateAttendanceView, MarkAttendanceRequest,
        StudentAttendanceRequest,
    },
};

pub struct AttendanceService;

impl AttendanceService {
    /// Take the roster for a (class, subject, day). A second submission for
    /// the same day is rejected without touching any record; amending an
    /// existing roster is not supported here.
    pub async fn mark_batch(
        pool: &PgPool,
        req: &MarkAttendanceRequest,
    ) -> Result<(), AppError> {
        if req.records.is_empty() {
            return Err(AppError::Validation(
                "No attendance records provided".into(),
            ));
        }

        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO attendance_sessions (sclass_id, subject_id, date)
             VALUES ($1, $2, $3)
             ON CONFLICT (sclass_id, subject_id, date) DO NOTHING",
        )
        .bind(req.class_id)
        .bind(req.subject_id)
        .bind(req.date)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if inserted == 0 {
            return Err(AppError::Conflict(
                "Attendance already taken for this date".into(),
            ));
        }

        // Records only for the class roster; anything else would be invisible
        // to the per-date view, which joins on the student's class.
        let roster: HashSet<Uuid> =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM students WHERE sclass_id = $1")
                .bind(req.class_id)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();
        for record in &req.records {
            if !roster.contains(&record.student_id) {
                return Err(AppError::Validation(
                    "Student does not belong to this class".into(),
                ));
            }
        }

        for record in &req.records {
            sqlx::query(
                "INSERT INTO attendance_records (student_id, subject_id, date, status)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (student_id, subject_id, date)
                 DO UPDATE SET status = EXCLUDED.status",
            )
            .bind(record.student_id)
            .bind(req.subject_id)
            .bind(req.date)
            .bind(record.status.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Per-student marking: an entry for the same (subject, day) is
    /// overwritten; a new day is appended only while the subject's session
    /// cap leaves room.
    pub async fn mark_student(
        pool: &PgPool,
        student_id: Uuid,
        req: &StudentAttendanceRequest,
    ) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let student_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(student_id)
                .fetch_one(&mut *tx)
                .await?;
        if !student_exists {
            return Err(AppError::not_found("Student"));
        }

        let sessions: i32 = sqlx::query_scalar("SELECT sessions FROM subjects WHERE id = $1")
            .bind(req.subject_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Subject"))?;

        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM attendance_records
             WHERE student_id = $1 AND subject_id = $2 AND date = $3",
        )
        .bind(student_id)
        .bind(req.subject_id)
        .bind(req.date)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(id) = existing {
            sqlx::query("UPDATE attendance_records SET status = $1 WHERE id = $2")
                .bind(req.status.to_string())
                .bind(id)
                .execute(&mut *tx)
                .await?;
        } else {
            let attended: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM attendance_records
                 WHERE student_id = $1 AND subject_id = $2",
            )
            .bind(student_id)
            .bind(req.subject_id)
            .fetch_one(&mut *tx)
            .await?;
            if attended >= sessions as i64 {
                return Err(AppError::Conflict(
                    "Maximum attendance limit reached".into(),
                ));
            }

            sqlx::query(
                "INSERT INTO attendance_records (student_id, subject_id, date, status)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(student_id)
            .bind(req.subject_id)
            .bind(req.date)
            .bind(req.status.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn by_date(
        pool: &PgPool,
        class_id: Uuid,
        subject_id: Uuid,
        date: NaiveDate,
    ) -> Result<DateAttendanceView, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM attendance_sessions
             WHERE sclass_id = $1 AND subject_id = $2 AND date = $3)",
        )
        .bind(class_id)
        .bind(subject_id)
        .bind(date)
        .fetch_one(pool)
        .await?;
        if !exists {
            return Err(AppError::NotFound(
                "No attendance found for this date, Mark the attendance!!".into(),
            ));
        }

        let records = sqlx::query_as::<_, DateAttendanceEntry>(
            "SELECT s.name, s.roll_num, r.status
             FROM attendance_records r
             JOIN students s ON s.id = r.student_id
             WHERE s.sclass_id = $1 AND r.subject_id = $2 AND r.date = $3
             ORDER BY s.roll_num",
        )
        .bind(class_id)
        .bind(subject_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(DateAttendanceView {
            class_id,
            subject_id,
            date,
            records,
        })
    }

    pub async fn percentage(
        pool: &PgPool,
        student_id: Uuid,
        subject_id: Uuid,
    ) -> Result<AttendancePercentage, AppError> {
        let student_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(student_id)
                .fetch_one(pool)
                .await?;
        if !student_exists {
            return Err(AppError::not_found("Student"));
        }

        let sessions: i32 = sqlx::query_scalar("SELECT sessions FROM subjects WHERE id = $1")
            .bind(subject_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Subject"))?;

        let (total, present): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'Present')
             FROM attendance_records
             WHERE student_id = $1 AND subject_id = $2",
        )
        .bind(student_id)
        .bind(subject_id)
        .fetch_one(pool)
        .await?;
        if total == 0 {
            return Err(AppError::NotFound(
                "No attendance for this subject till now".into(),
            ));
        }

        Ok(AttendancePercentage {
            total_classes: sessions,
            present_classes: present,
            percentage: percentage_string(present, sessions),
        })
    }

    /// Drop every student's records for one subject, school-wide. Session
    /// markers go too, so those dates can be taken again.
    pub async fn clear_subject(pool: &PgPool, subject_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM attendance_records WHERE subject_id = $1")
            .bind(subject_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM attendance_sessions WHERE subject_id = $1")
            .bind(subject_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(deleted)
    }

    /// Reset attendance for every student of a school.
    pub async fn clear_school(pool: &PgPool, school_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        let deleted = sqlx::query(
            "DELETE FROM attendance_records
             WHERE student_id IN (SELECT id FROM students WHERE school_id = $1)",
        )
        .bind(school_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        sqlx::query(
            "DELETE FROM attendance_sessions
             WHERE sclass_id IN (SELECT id FROM sclasses WHERE school_id = $1)",
        )
        .bind(school_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(deleted)
    }

    pub async fn clear_student_subject(
        pool: &PgPool,
        student_id: Uuid,
        subject_id: Uuid,
    ) -> Result<u64, AppError> {
        let deleted = sqlx::query(
            "DELETE FROM attendance_records WHERE student_id = $1 AND subject_id = $2",
        )
        .bind(student_id)
        .bind(subject_id)
        .execute(pool)
        .await?
        .rows_affected();
        Ok(deleted)
    }

    pub async fn clear_student(pool: &PgPool, student_id: Uuid) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM attendance_records WHERE student_id = $1")
            .bind(student_id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(deleted)
    }
}

/// present / sessions × 100, rendered with two decimals.
pub fn percentage_string(present: i64, sessions: i32) -> String {
    if sessions <= 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", present as f64 / sessions as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_has_two_decimals() {
        assert_eq!(percentage_string(5, 10), "50.00");
        assert_eq!(percentage_string(5, 6), "83.33");
        assert_eq!(percentage_string(0, 10), "0.00");
        assert_eq!(percentage_string(10, 10), "100.00");
    }

    #[test]
    fn zero_sessions_does_not_divide() {
        assert_eq!(percentage_string(3, 0), "0.00");
    }
}
