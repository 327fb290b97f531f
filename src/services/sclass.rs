use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::sclass::{CreateSclassRequest, Sclass},
};

pub struct SclassService;

impl SclassService {
    pub async fn create(pool: &PgPool, req: &CreateSclassRequest) -> Result<Sclass, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sclasses WHERE school_id = $1 AND sclass_name = $2)",
        )
        .bind(req.school_id)
        .bind(&req.sclass_name)
        .fetch_one(pool)
        .await?;
        if exists {
            return Err(AppError::Conflict(
                "Sorry this class name already exists".into(),
            ));
        }

        let sclass = sqlx::query_as::<_, Sclass>(
            "INSERT INTO sclasses (sclass_name, school_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(&req.sclass_name)
        .bind(req.school_id)
        .fetch_one(pool)
        .await?;
        Ok(sclass)
    }

    pub async fn list(pool: &PgPool, school_id: Uuid) -> Result<Vec<Sclass>, AppError> {
        let classes = sqlx::query_as::<_, Sclass>(
            "SELECT * FROM sclasses WHERE school_id = $1 ORDER BY sclass_name",
        )
        .bind(school_id)
        .fetch_all(pool)
        .await?;
        if classes.is_empty() {
            return Err(AppError::NotFound("No sclasses found".into()));
        }
        Ok(classes)
    }

    pub async fn detail(pool: &PgPool, id: Uuid) -> Result<Sclass, AppError> {
        sqlx::query_as::<_, Sclass>("SELECT * FROM sclasses WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Class"))
    }

    /// Delete one class and everything attached to it: students, subjects,
    /// teachers and assignments of the class, with teacher/subject links
    /// unset first so the cycle between those tables never blocks a delete.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Sclass, AppError> {
        let mut tx = pool.begin().await?;

        let sclass = sqlx::query_as::<_, Sclass>("SELECT * FROM sclasses WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Class"))?;

        Self::cascade_delete_class(&mut tx, id).await?;
        sqlx::query("DELETE FROM sclasses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(sclass)
    }

    pub async fn delete_by_school(pool: &PgPool, school_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM sclasses WHERE school_id = $1")
            .bind(school_id)
            .fetch_all(&mut *tx)
            .await?;
        if ids.is_empty() {
            return Err(AppError::NotFound("No sclasses found to delete".into()));
        }

        for id in &ids {
            Self::cascade_delete_class(&mut tx, *id).await?;
        }
        let deleted = sqlx::query("DELETE FROM sclasses WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted)
    }

    async fn cascade_delete_class(
        tx: &mut Transaction<'_, Postgres>,
        sclass_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE subjects SET teacher_id = NULL
             WHERE teacher_id IN (SELECT id FROM teachers WHERE teach_sclass = $1)",
        )
        .bind(sclass_id)
        .execute(&mut **tx)
        .await?;
        sqlx::query(
            "UPDATE teachers SET teach_subject = NULL
             WHERE teach_subject IN (SELECT id FROM subjects WHERE sclass_id = $1)",
        )
        .bind(sclass_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            "DELETE FROM submissions WHERE assignment_id IN
             (SELECT id FROM assignments WHERE sclass_id = $1)",
        )
        .bind(sclass_id)
        .execute(&mut **tx)
        .await?;
        sqlx::query("DELETE FROM assignments WHERE sclass_id = $1")
            .bind(sclass_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM students WHERE sclass_id = $1")
            .bind(sclass_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM teachers WHERE teach_sclass = $1")
            .bind(sclass_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM subjects WHERE sclass_id = $1")
            .bind(sclass_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
