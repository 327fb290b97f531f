use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        attendance::AttendanceRecordDetail,
        student::{
            ExamResultDetail, ExamResultRequest, RegisterStudentRequest, Student, StudentDetail,
            StudentLoginRequest, StudentSummary, UpdateStudentRequest,
        },
    },
};

pub struct StudentService;

impl StudentService {
    pub async fn register(
        pool: &PgPool,
        req: &RegisterStudentRequest,
    ) -> Result<Student, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM students
             WHERE roll_num = $1 AND school_id = $2 AND sclass_id = $3)",
        )
        .bind(req.roll_num)
        .bind(req.school_id)
        .bind(req.sclass_id)
        .fetch_one(pool)
        .await?;
        if exists {
            return Err(AppError::Conflict("Roll Number already exists".into()));
        }

        let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students (name, roll_num, password_hash, sclass_id, school_id, parent_email)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.roll_num)
        .bind(&password_hash)
        .bind(req.sclass_id)
        .bind(req.school_id)
        .bind(&req.parent_email)
        .fetch_one(pool)
        .await?;
        Ok(student)
    }

    pub async fn login(pool: &PgPool, req: &StudentLoginRequest) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE roll_num = $1 AND name = $2",
        )
        .bind(req.roll_num)
        .bind(&req.student_name)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;

        if !bcrypt::verify(&req.password, &student.password_hash)? {
            return Err(AppError::Auth("Invalid password".into()));
        }
        Ok(student)
    }

    pub async fn list_by_school(
        pool: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<StudentSummary>, AppError> {
        let students = sqlx::query_as::<_, StudentSummary>(
            "SELECT s.id, s.name, s.roll_num, s.sclass_id, c.sclass_name,
                    s.school_id, s.parent_email, s.role
             FROM students s
             JOIN sclasses c ON c.id = s.sclass_id
             WHERE s.school_id = $1
             ORDER BY c.sclass_name, s.roll_num",
        )
        .bind(school_id)
        .fetch_all(pool)
        .await?;
        if students.is_empty() {
            return Err(AppError::NotFound("No students found".into()));
        }
        Ok(students)
    }

    pub async fn list_by_class(
        pool: &PgPool,
        sclass_id: Uuid,
    ) -> Result<Vec<StudentSummary>, AppError> {
        let students = sqlx::query_as::<_, StudentSummary>(
            "SELECT s.id, s.name, s.roll_num, s.sclass_id, c.sclass_name,
                    s.school_id, s.parent_email, s.role
             FROM students s
             JOIN sclasses c ON c.id = s.sclass_id
             WHERE s.sclass_id = $1
             ORDER BY s.roll_num",
        )
        .bind(sclass_id)
        .fetch_all(pool)
        .await?;
        if students.is_empty() {
            return Err(AppError::NotFound("No students found".into()));
        }
        Ok(students)
    }

    /// Full view: school and class names populated, exam results and
    /// attendance attached with their subject names.
    pub async fn detail(pool: &PgPool, id: Uuid) -> Result<StudentDetail, AppError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: Uuid,
            name: String,
            roll_num: i32,
            sclass_id: Uuid,
            sclass_name: String,
            school_id: Uuid,
            school_name: String,
            parent_email: String,
            role: String,
        }

        let row = sqlx::query_as::<_, Row>(
            "SELECT s.id, s.name, s.roll_num, s.sclass_id, c.sclass_name,
                    s.school_id, a.school_name, s.parent_email, s.role
             FROM students s
             JOIN sclasses c ON c.id = s.sclass_id
             JOIN admins a ON a.id = s.school_id
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;

        let exam_results = sqlx::query_as::<_, ExamResultDetail>(
            "SELECT r.subject_id, sub.sub_name, r.marks_obtained
             FROM exam_results r
             JOIN subjects sub ON sub.id = r.subject_id
             WHERE r.student_id = $1
             ORDER BY sub.sub_name",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let attendance = sqlx::query_as::<_, AttendanceRecordDetail>(
            "SELECT r.subject_id, sub.sub_name, sub.sessions, r.date, r.status
             FROM attendance_records r
             JOIN subjects sub ON sub.id = r.subject_id
             WHERE r.student_id = $1
             ORDER BY r.date",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(StudentDetail {
            id: row.id,
            name: row.name,
            roll_num: row.roll_num,
            sclass_id: row.sclass_id,
            sclass_name: row.sclass_name,
            school_id: row.school_id,
            school_name: row.school_name,
            parent_email: row.parent_email,
            role: row.role,
            exam_results,
            attendance,
        })
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateStudentRequest,
    ) -> Result<Student, AppError> {
        let password_hash = match &req.password {
            Some(p) => Some(bcrypt::hash(p, bcrypt::DEFAULT_COST)?),
            None => None,
        };

        sqlx::query_as::<_, Student>(
            "UPDATE students
             SET name          = COALESCE($1, name),
                 roll_num      = COALESCE($2, roll_num),
                 password_hash = COALESCE($3, password_hash),
                 sclass_id     = COALESCE($4, sclass_id),
                 parent_email  = COALESCE($5, parent_email)
             WHERE id = $6
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.roll_num)
        .bind(&password_hash)
        .bind(req.sclass_id)
        .bind(&req.parent_email)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>("DELETE FROM students WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found("Student"))
    }

    pub async fn delete_by_school(pool: &PgPool, school_id: Uuid) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM students WHERE school_id = $1")
            .bind(school_id)
            .execute(pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::NotFound("No students found to delete".into()));
        }
        Ok(deleted)
    }

    pub async fn delete_by_class(pool: &PgPool, sclass_id: Uuid) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM students WHERE sclass_id = $1")
            .bind(sclass_id)
            .execute(pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::NotFound("No students found to delete".into()));
        }
        Ok(deleted)
    }

    /// Upsert: a second result for the same subject overwrites the marks.
    pub async fn update_exam_result(
        pool: &PgPool,
        student_id: Uuid,
        req: &ExamResultRequest,
    ) -> Result<(), AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(student_id)
            .fetch_one(pool)
            .await?;
        if !exists {
            return Err(AppError::not_found("Student"));
        }

        sqlx::query(
            "INSERT INTO exam_results (student_id, subject_id, marks_obtained)
             VALUES ($1, $2, $3)
             ON CONFLICT (student_id, subject_id)
             DO UPDATE SET marks_obtained = EXCLUDED.marks_obtained",
        )
        .bind(student_id)
        .bind(req.subject_id)
        .bind(req.marks_obtained)
        .execute(pool)
        .await?;
        Ok(())
    }
}
