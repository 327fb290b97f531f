use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppError, models::teacher::ComplaintMailRequest};

pub struct MailService;

impl MailService {
    /// Send a complaint notification to a student's registered parent email,
    /// authenticating against the relay with the teacher's own address and
    /// app-specific password.
    pub async fn send_complaint(
        pool: &PgPool,
        smtp_relay: &str,
        req: &ComplaintMailRequest,
    ) -> Result<(), AppError> {
        let student: Option<(String, String)> =
            sqlx::query_as("SELECT name, parent_email FROM students WHERE id = $1")
                .bind(req.student_id)
                .fetch_optional(pool)
                .await?;
        let (student_name, parent_email) =
            student.ok_or_else(|| AppError::not_found("Student"))?;
        if parent_email.is_empty() {
            return Err(AppError::Validation(
                "Parent email not found for the student".into(),
            ));
        }

        let teacher: Option<(String, String, Option<String>)> =
            sqlx::query_as("SELECT name, email, app_password FROM teachers WHERE id = $1")
                .bind(req.teacher_id)
                .fetch_optional(pool)
                .await?;
        let (teacher_name, teacher_email, app_password) =
            teacher.ok_or_else(|| AppError::not_found("Teacher"))?;
        let app_password = app_password.ok_or_else(|| {
            AppError::Validation("Teacher's email credentials are not available".into())
        })?;

        let from: Mailbox = teacher_email
            .parse()
            .map_err(|_| AppError::Validation("Invalid teacher email".into()))?;
        let to: Mailbox = parent_email
            .parse()
            .map_err(|_| AppError::Validation("Invalid parent email".into()))?;

        let body = complaint_body(
            &student_name,
            &req.subject,
            &req.description,
            &teacher_name,
        );
        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(format!(
                "Complaint Regarding {student_name}: {}",
                req.subject
            ))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Mail(e.to_string()))?;

        let creds = Credentials::new(teacher_email, app_password);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_relay)
            .map_err(|e| AppError::Mail(e.to_string()))?
            .credentials(creds)
            .build();

        transport
            .send(email)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;
        Ok(())
    }
}

fn complaint_body(student: &str, subject: &str, description: &str, teacher: &str) -> String {
    format!(
        "Dear Parent,\n\n\
         A complaint has been raised regarding your child, {student}:\n\n\
         Subject: {subject}\n\n\
         Description: {description}\n\n\
         Please address this matter promptly.\n\n\
         Regards,\n{teacher}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_names_child_subject_and_teacher() {
        let body = complaint_body("Aditi", "Homework", "Missed three assignments", "Mr. Rao");
        assert!(body.contains("your child, Aditi"));
        assert!(body.contains("Subject: Homework"));
        assert!(body.contains("Missed three assignments"));
        assert!(body.trim_end().ends_with("Mr. Rao"));
    }
}
