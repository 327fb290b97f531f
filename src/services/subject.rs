use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::subject::{CreateSubjectsRequest, Subject, SubjectDetail},
};

const DETAIL_COLS: &str = "s.id, s.sub_name, s.sub_code, s.sessions,
     s.sclass_id, c.sclass_name, s.school_id, s.teacher_id, t.name AS teacher_name";

pub struct SubjectService;

impl SubjectService {
    /// Batch insert; the whole batch is rejected if any sub-code is already
    /// taken within the school.
    pub async fn create(
        pool: &PgPool,
        req: &CreateSubjectsRequest,
    ) -> Result<Vec<Subject>, AppError> {
        if req.subjects.is_empty() {
            return Err(AppError::Validation("No subjects provided".into()));
        }

        let mut tx = pool.begin().await?;
        for new in &req.subjects {
            let taken: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM subjects WHERE school_id = $1 AND sub_code = $2)",
            )
            .bind(req.school_id)
            .bind(&new.sub_code)
            .fetch_one(&mut *tx)
            .await?;
            if taken {
                return Err(AppError::Conflict(
                    "Sorry this subcode must be unique as it already exists".into(),
                ));
            }
        }

        let mut created = Vec::with_capacity(req.subjects.len());
        for new in &req.subjects {
            let subject = sqlx::query_as::<_, Subject>(
                "INSERT INTO subjects (sub_name, sub_code, sessions, sclass_id, school_id)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING *",
            )
            .bind(&new.sub_name)
            .bind(&new.sub_code)
            .bind(new.sessions)
            .bind(req.sclass_id)
            .bind(req.school_id)
            .fetch_one(&mut *tx)
            .await?;
            created.push(subject);
        }
        tx.commit().await?;
        Ok(created)
    }

    pub async fn all_by_school(
        pool: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<SubjectDetail>, AppError> {
        let subjects = sqlx::query_as::<_, SubjectDetail>(&format!(
            "SELECT {DETAIL_COLS}
             FROM subjects s
             JOIN sclasses c ON c.id = s.sclass_id
             LEFT JOIN teachers t ON t.id = s.teacher_id
             WHERE s.school_id = $1
             ORDER BY s.sub_name"
        ))
        .bind(school_id)
        .fetch_all(pool)
        .await?;
        if subjects.is_empty() {
            return Err(AppError::NotFound("No subjects found".into()));
        }
        Ok(subjects)
    }

    pub async fn by_class(pool: &PgPool, sclass_id: Uuid) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects WHERE sclass_id = $1 ORDER BY sub_name",
        )
        .bind(sclass_id)
        .fetch_all(pool)
        .await?;
        if subjects.is_empty() {
            return Err(AppError::NotFound("No subjects found".into()));
        }
        Ok(subjects)
    }

    /// Subjects of a school with no teacher assigned yet.
    pub async fn free_by_school(pool: &PgPool, school_id: Uuid) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects
             WHERE school_id = $1 AND teacher_id IS NULL
             ORDER BY sub_name",
        )
        .bind(school_id)
        .fetch_all(pool)
        .await?;
        if subjects.is_empty() {
            return Err(AppError::NotFound("No subjects found".into()));
        }
        Ok(subjects)
    }

    pub async fn detail(pool: &PgPool, id: Uuid) -> Result<SubjectDetail, AppError> {
        sqlx::query_as::<_, SubjectDetail>(&format!(
            "SELECT {DETAIL_COLS}
             FROM subjects s
             JOIN sclasses c ON c.id = s.sclass_id
             LEFT JOIN teachers t ON t.id = s.teacher_id
             WHERE s.id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Subject"))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Subject, AppError> {
        let mut tx = pool.begin().await?;

        let subject = sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Subject"))?;

        Self::unlink_subjects(&mut tx, &[id]).await?;
        sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(subject)
    }

    pub async fn delete_by_school(pool: &PgPool, school_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM subjects WHERE school_id = $1")
            .bind(school_id)
            .fetch_all(&mut *tx)
            .await?;
        if ids.is_empty() {
            return Err(AppError::NotFound("No subjects found to delete".into()));
        }

        Self::unlink_subjects(&mut tx, &ids).await?;
        let deleted = sqlx::query("DELETE FROM subjects WHERE school_id = $1")
            .bind(school_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(deleted)
    }

    pub async fn delete_by_class(pool: &PgPool, sclass_id: Uuid) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM subjects WHERE sclass_id = $1")
            .bind(sclass_id)
            .fetch_all(&mut *tx)
            .await?;
        if ids.is_empty() {
            return Err(AppError::NotFound("No subjects found to delete".into()));
        }

        Self::unlink_subjects(&mut tx, &ids).await?;
        let deleted = sqlx::query("DELETE FROM subjects WHERE sclass_id = $1")
            .bind(sclass_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(deleted)
    }

    /// Unset teacher assignments pointing at the given subjects and drop the
    /// assignments posted under them. Exam results and attendance records go
    /// with the subject rows via their foreign keys.
    async fn unlink_subjects(
        tx: &mut Transaction<'_, Postgres>,
        ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE teachers SET teach_subject = NULL WHERE teach_subject = ANY($1)")
            .bind(ids)
            .execute(&mut **tx)
            .await?;
        sqlx::query(
            "DELETE FROM submissions WHERE assignment_id IN
             (SELECT id FROM assignments WHERE subject_id = ANY($1))",
        )
        .bind(ids)
        .execute(&mut **tx)
        .await?;
        sqlx::query("DELETE FROM assignments WHERE subject_id = ANY($1)")
            .bind(ids)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
