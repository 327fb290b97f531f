use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        attendance::TeacherAttendanceRequest,
        teacher::{
            RegisterTeacherRequest, Teacher, TeacherAttendanceEntry, TeacherDetail,
            TeacherLoginRequest, UpdateTeacherSubjectRequest,
        },
    },
};

const DETAIL_COLS: &str = "t.id, t.name, t.email, t.role,
     t.school_id, a.school_name,
     t.teach_sclass, c.sclass_name,
     t.teach_subject, sub.sub_name, sub.sessions";

const DETAIL_JOINS: &str = "FROM teachers t
     JOIN admins a ON a.id = t.school_id
     JOIN sclasses c ON c.id = t.teach_sclass
     LEFT JOIN subjects sub ON sub.id = t.teach_subject";

pub struct TeacherService;

impl TeacherService {
    /// Register a teacher and, when a subject is supplied, point that
    /// subject's teacher reference at the new row — both sides in one
    /// transaction.
    pub async fn register(
        pool: &PgPool,
        req: &RegisterTeacherRequest,
    ) -> Result<Teacher, AppError> {
        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE email = $1)")
                .bind(&req.email)
                .fetch_one(pool)
                .await?;
        if email_taken {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
        let mut tx = pool.begin().await?;

        let teacher = sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers
             (name, email, password_hash, app_password, school_id, teach_subject, teach_sclass)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&password_hash)
        .bind(&req.app_password)
        .bind(req.school_id)
        .bind(req.teach_subject)
        .bind(req.teach_sclass)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(subject_id) = req.teach_subject {
            sqlx::query("UPDATE subjects SET teacher_id = $1 WHERE id = $2")
                .bind(teacher.id)
                .bind(subject_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(teacher)
    }

    pub async fn login(pool: &PgPool, req: &TeacherLoginRequest) -> Result<TeacherDetail, AppError> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, password_hash FROM teachers WHERE email = $1")
                .bind(&req.email)
                .fetch_optional(pool)
                .await?;
        let (id, password_hash) = row.ok_or_else(|| AppError::not_found("Teacher"))?;

        if !bcrypt::verify(&req.password, &password_hash)? {
            return Err(AppError::Auth("Invalid password".into()));
        }
        Self::detail(pool, id).await
    }

    pub async fn list_by_school(
        pool: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<TeacherDetail>, AppError> {
        let teachers = sqlx::query_as::<_, TeacherDetail>(&format!(
            "SELECT {DETAIL_COLS} {DETAIL_JOINS}
             WHERE t.school_id = $1
             ORDER BY t.name"
        ))
        .bind(school_id)
        .fetch_all(pool)
        .await?;
        if teachers.is_empty() {
            return Err(AppError::NotFound("No teachers found".into()));
        }
        Ok(teachers)
    }

    pub async fn detail(pool: &PgPool, id: Uuid) -> Result<TeacherDetail, AppError> {
        sqlx::query_as::<_, TeacherDetail>(&format!(
            "SELECT {DETAIL_COLS} {DETAIL_JOINS} WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher"))
    }

    /// Reassign a teacher to a subject, updating both directions of the link.
    pub async fn update_subject(
        pool: &PgPool,
        req: &UpdateTeacherSubjectRequest,
    ) -> Result<Teacher, AppError> {
        let mut tx = pool.begin().await?;

        let teacher = sqlx::query_as::<_, Teacher>(
            "UPDATE teachers SET teach_subject = $1 WHERE id = $2 RETURNING *",
        )
        .bind(req.teach_subject)
        .bind(req.teacher_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher"))?;

        let updated = sqlx::query("UPDATE subjects SET teacher_id = $1 WHERE id = $2")
            .bind(teacher.id)
            .bind(req.teach_subject)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if updated == 0 {
            return Err(AppError::not_found("Subject"));
        }

        tx.commit().await?;
        Ok(teacher)
    }

    /// Delete one teacher; the assigned subject keeps existing with its
    /// teacher reference unset rather than being removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Teacher, AppError> {
        let mut tx = pool.begin().await?;

        let teacher = sqlx::query_as::<_, Teacher>("SELECT * FROM teachers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Teacher"))?;

        Self::unlink_and_delete(&mut tx, &[id]).await?;
        tx.commit().await?;
        Ok(teacher)
    }

    pub async fn delete_by_school(pool: &PgPool, school_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM teachers WHERE school_id = $1")
            .bind(school_id)
            .fetch_all(&mut *tx)
            .await?;
        if ids.is_empty() {
            return Err(AppError::NotFound("No teachers found to delete".into()));
        }

        let deleted = Self::unlink_and_delete(&mut tx, &ids).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    pub async fn delete_by_class(pool: &PgPool, sclass_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM teachers WHERE teach_sclass = $1")
            .bind(sclass_id)
            .fetch_all(&mut *tx)
            .await?;
        if ids.is_empty() {
            return Err(AppError::NotFound("No teachers found to delete".into()));
        }

        let deleted = Self::unlink_and_delete(&mut tx, &ids).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn unlink_and_delete(
        tx: &mut Transaction<'_, Postgres>,
        ids: &[Uuid],
    ) -> Result<u64, AppError> {
        sqlx::query("UPDATE subjects SET teacher_id = NULL WHERE teacher_id = ANY($1)")
            .bind(ids)
            .execute(&mut **tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM teachers WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut **tx)
            .await?
            .rows_affected();
        Ok(deleted)
    }

    /// Upsert by day: marking the same day again overwrites the status.
    pub async fn mark_attendance(
        pool: &PgPool,
        teacher_id: Uuid,
        req: &TeacherAttendanceRequest,
    ) -> Result<Vec<TeacherAttendanceEntry>, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1)")
            .bind(teacher_id)
            .fetch_one(pool)
            .await?;
        if !exists {
            return Err(AppError::not_found("Teacher"));
        }

        sqlx::query(
            "INSERT INTO teacher_attendance (teacher_id, date, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (teacher_id, date) DO UPDATE SET status = EXCLUDED.status",
        )
        .bind(teacher_id)
        .bind(req.date)
        .bind(req.status.to_string())
        .execute(pool)
        .await?;

        let entries = sqlx::query_as::<_, TeacherAttendanceEntry>(
            "SELECT date, status FROM teacher_attendance WHERE teacher_id = $1 ORDER BY date",
        )
        .bind(teacher_id)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }
}
