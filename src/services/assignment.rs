use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::assignment::{
        Assignment, AssignmentBrief, PostAssignmentRequest, SubmitAssignmentRequest, Submission,
    },
};

pub struct AssignmentService;

impl AssignmentService {
    /// Post a new assignment. An exact duplicate of (class, subject,
    /// deadline, description, file URL) is rejected; anything differing in
    /// even one field is a new assignment.
    pub async fn post(pool: &PgPool, req: &PostAssignmentRequest) -> Result<Assignment, AppError> {
        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assignments
             WHERE sclass_id = $1 AND subject_id = $2 AND deadline = $3
               AND description = $4 AND file_url = $5)",
        )
        .bind(req.class_id)
        .bind(req.subject_id)
        .bind(req.deadline)
        .bind(&req.description)
        .bind(&req.file_url)
        .fetch_one(pool)
        .await?;
        if duplicate {
            return Err(AppError::Conflict(
                "An assignment with the same details already exists".into(),
            ));
        }

        let assignment = sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (sclass_id, subject_id, deadline, description, file_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(req.class_id)
        .bind(req.subject_id)
        .bind(req.deadline)
        .bind(&req.description)
        .bind(&req.file_url)
        .fetch_one(pool)
        .await?;
        Ok(assignment)
    }

    /// Submit on behalf of a student, once. Late submissions are accepted;
    /// the deadline is advisory. The submission timestamp is set here, never
    /// taken from the caller.
    pub async fn submit(
        pool: &PgPool,
        req: &SubmitAssignmentRequest,
    ) -> Result<Submission, AppError> {
        let assignment_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assignments WHERE id = $1)")
                .bind(req.assignment_id)
                .fetch_one(pool)
                .await?;
        if !assignment_exists {
            return Err(AppError::not_found("Assignment"));
        }

        // The unique index on (assignment_id, student_id) closes the race two
        // simultaneous submissions would otherwise win together.
        let submission = sqlx::query_as::<_, Submission>(
            "INSERT INTO submissions (assignment_id, student_id, name, roll_num, file_url)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (assignment_id, student_id) DO NOTHING
             RETURNING *",
        )
        .bind(req.assignment_id)
        .bind(req.student_id)
        .bind(&req.name)
        .bind(req.roll_num)
        .bind(&req.file)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            AppError::Conflict("You have already submitted this assignment".into())
        })?;
        Ok(submission)
    }

    /// Teacher listing for one (class, subject), newest first, submissions
    /// included implicitly via `submissions`.
    pub async fn by_class_and_subject(
        pool: &PgPool,
        class_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Vec<Assignment>, AppError> {
        let assignments = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments
             WHERE sclass_id = $1 AND subject_id = $2
             ORDER BY created_at DESC",
        )
        .bind(class_id)
        .bind(subject_id)
        .fetch_all(pool)
        .await?;
        Ok(assignments)
    }

    /// Student view of a class's assignments: deadline, description and file
    /// only — submissions stay hidden.
    pub async fn briefs_for_class(
        pool: &PgPool,
        class_id: Uuid,
    ) -> Result<Vec<AssignmentBrief>, AppError> {
        let assignments = sqlx::query_as::<_, AssignmentBrief>(
            "SELECT id, deadline, description, file_url FROM assignments
             WHERE sclass_id = $1
             ORDER BY created_at DESC",
        )
        .bind(class_id)
        .fetch_all(pool)
        .await?;
        Ok(assignments)
    }

    pub async fn briefs_for_class_and_subject(
        pool: &PgPool,
        class_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Vec<AssignmentBrief>, AppError> {
        let assignments = sqlx::query_as::<_, AssignmentBrief>(
            "SELECT id, deadline, description, file_url FROM assignments
             WHERE sclass_id = $1 AND subject_id = $2
             ORDER BY created_at DESC",
        )
        .bind(class_id)
        .bind(subject_id)
        .fetch_all(pool)
        .await?;
        Ok(assignments)
    }

    pub async fn submissions(
        pool: &PgPool,
        assignment_id: Uuid,
    ) -> Result<Vec<Submission>, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assignments WHERE id = $1)")
                .bind(assignment_id)
                .fetch_one(pool)
                .await?;
        if !exists {
            return Err(AppError::not_found("Assignment"));
        }

        let submissions = sqlx::query_as::<_, Submission>(
            "SELECT * FROM submissions WHERE assignment_id = $1 ORDER BY submitted_at",
        )
        .bind(assignment_id)
        .fetch_all(pool)
        .await?;
        Ok(submissions)
    }
}
