use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::admin::{Admin, AdminLoginRequest, RegisterAdminRequest},
};

pub struct AdminService;

impl AdminService {
    pub async fn register(pool: &PgPool, req: &RegisterAdminRequest) -> Result<Admin, AppError> {
        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins WHERE email = $1)")
                .bind(&req.email)
                .fetch_one(pool)
                .await?;
        if email_taken {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        let school_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins WHERE school_name = $1)")
                .bind(&req.school_name)
                .fetch_one(pool)
                .await?;
        if school_taken {
            return Err(AppError::Conflict("School name already exists".into()));
        }

        let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
        let admin = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (school_name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(&req.school_name)
        .bind(&req.email)
        .bind(&password_hash)
        .fetch_one(pool)
        .await?;
        Ok(admin)
    }

    pub async fn login(pool: &PgPool, req: &AdminLoginRequest) -> Result<Admin, AppError> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
            .bind(&req.email)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        if !bcrypt::verify(&req.password, &admin.password_hash)? {
            return Err(AppError::Auth("Invalid password".into()));
        }
        Ok(admin)
    }

    pub async fn detail(pool: &PgPool, id: Uuid) -> Result<Admin, AppError> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Admin"))
    }

    /// Total of paid fee amounts across every student of the school.
    pub async fn fee_collection(pool: &PgPool, school_id: Uuid) -> Result<i64, AppError> {
        let student_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE school_id = $1")
                .bind(school_id)
                .fetch_one(pool)
                .await?;
        if student_count == 0 {
            return Err(AppError::NotFound(
                "No students found for this admin's school".into(),
            ));
        }

        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(f.amount), 0)::BIGINT
             FROM fees f
             JOIN students s ON s.id = f.student_id
             WHERE s.school_id = $1 AND f.is_paid",
        )
        .bind(school_id)
        .fetch_one(pool)
        .await?;
        Ok(total)
    }

    /// Remove a school and everything it owns. Runs in one transaction so a
    /// failure mid-sequence cannot strand half a school.
    pub async fn delete(pool: &PgPool, school_id: Uuid) -> Result<Admin, AppError> {
        let mut tx = pool.begin().await?;

        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(school_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Admin"))?;

        // Break the subjects <-> teachers cycle before deleting either side.
        sqlx::query("UPDATE subjects SET teacher_id = NULL WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE teachers SET teach_subject = NULL WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM submissions WHERE assignment_id IN
             (SELECT id FROM assignments WHERE sclass_id IN
              (SELECT id FROM sclasses WHERE school_id = $1))",
        )
        .bind(school_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "DELETE FROM assignments WHERE sclass_id IN
             (SELECT id FROM sclasses WHERE school_id = $1)",
        )
        .bind(school_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM complaints WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM notices WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM students WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM teachers WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM subjects WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sclasses WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(admin)
    }
}
