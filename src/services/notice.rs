use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::notice::{CreateNoticeRequest, Notice, UpdateNoticeRequest},
};

pub struct NoticeService;

impl NoticeService {
    pub async fn create(pool: &PgPool, req: &CreateNoticeRequest) -> Result<Notice, AppError> {
        let notice = sqlx::query_as::<_, Notice>(
            "INSERT INTO notices (school_id, title, details, date)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(req.school_id)
        .bind(&req.title)
        .bind(&req.details)
        .bind(req.date)
        .fetch_one(pool)
        .await?;
        Ok(notice)
    }

    pub async fn list(pool: &PgPool, school_id: Uuid) -> Result<Vec<Notice>, AppError> {
        let notices = sqlx::query_as::<_, Notice>(
            "SELECT * FROM notices WHERE school_id = $1 ORDER BY date DESC",
        )
        .bind(school_id)
        .fetch_all(pool)
        .await?;
        if notices.is_empty() {
            return Err(AppError::NotFound("No notices found".into()));
        }
        Ok(notices)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateNoticeRequest,
    ) -> Result<Notice, AppError> {
        sqlx::query_as::<_, Notice>(
            "UPDATE notices
             SET title   = COALESCE($1, title),
                 details = COALESCE($2, details),
                 date    = COALESCE($3, date)
             WHERE id = $4
             RETURNING *",
        )
        .bind(&req.title)
        .bind(&req.details)
        .bind(req.date)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Notice"))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Notice, AppError> {
        sqlx::query_as::<_, Notice>("DELETE FROM notices WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Notice"))
    }

    pub async fn delete_by_school(pool: &PgPool, school_id: Uuid) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM notices WHERE school_id = $1")
            .bind(school_id)
            .execute(pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::NotFound("No notices found to delete".into()));
        }
        Ok(deleted)
    }
}
