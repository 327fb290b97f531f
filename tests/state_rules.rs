//! Database-backed tests for the write-path rules: attendance caps and
//! once-per-date sessions, the fee payment guard, and single submissions.
//! Each test runs against its own migrated database.

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use schoolverse_api::{
    config::Config,
    error::AppError,
    models::{
        admin::RegisterAdminRequest,
        assignment::{PostAssignmentRequest, SubmitAssignmentRequest},
        attendance::{
            AttendanceStatus, MarkAttendanceRequest, StudentAttendanceRequest, StudentStatus,
        },
        fee::PayFeeRequest,
        notice::CreateNoticeRequest,
        sclass::CreateSclassRequest,
        student::RegisterStudentRequest,
        subject::{CreateSubjectsRequest, NewSubject},
    },
    services::{
        admin::AdminService,
        assignment::AssignmentService,
        attendance::AttendanceService,
        fee::FeeService,
        notice::NoticeService,
        payment::{sign, PaymentGateway},
        sclass::SclassService,
        student::StudentService,
        subject::SubjectService,
    },
};

struct Fixture {
    school_id: Uuid,
    class_id: Uuid,
    subject_id: Uuid,
    student_id: Uuid,
}

async fn seed(pool: &PgPool, sessions: i32) -> Fixture {
    let admin = AdminService::register(
        pool,
        &RegisterAdminRequest {
            school_name: "Green Valley High".into(),
            email: "admin@greenvalley.test".into(),
            password: "secret123".into(),
        },
    )
    .await
    .unwrap();

    let sclass = SclassService::create(
        pool,
        &CreateSclassRequest {
            sclass_name: "Grade 5".into(),
            school_id: admin.id,
        },
    )
    .await
    .unwrap();

    let subjects = SubjectService::create(
        pool,
        &CreateSubjectsRequest {
            school_id: admin.id,
            sclass_id: sclass.id,
            subjects: vec![NewSubject {
                sub_name: "Mathematics".into(),
                sub_code: "MTH101".into(),
                sessions,
            }],
        },
    )
    .await
    .unwrap();

    let student = StudentService::register(
        pool,
        &RegisterStudentRequest {
            name: "Aditi Sharma".into(),
            roll_num: 1,
            password: "secret123".into(),
            sclass_id: sclass.id,
            school_id: admin.id,
            parent_email: "parent@home.test".into(),
        },
    )
    .await
    .unwrap();

    Fixture {
        school_id: admin.id,
        class_id: sclass.id,
        subject_id: subjects[0].id,
        student_id: student.id,
    }
}

fn test_gateway(secret: &str) -> PaymentGateway {
    PaymentGateway::new(&Config {
        database_url: "postgres://localhost/unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        app_base_url: "http://localhost:5000".into(),
        media_dir: "/tmp/uploads".into(),
        default_fee_amount: 1000,
        razorpay_key_id: "rzp_test_key".into(),
        razorpay_key_secret: secret.into(),
        razorpay_api_url: "http://localhost:0".into(),
        smtp_relay: "smtp.gmail.com".into(),
    })
}

async fn record_count(pool: &PgPool, student_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance_records WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn session_cap_rejects_new_date_and_leaves_ledger_unchanged(pool: PgPool) {
    let fx = seed(&pool, 1).await;
    let day1 = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let day2 = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();

    AttendanceService::mark_student(
        &pool,
        fx.student_id,
        &StudentAttendanceRequest {
            subject_id: fx.subject_id,
            status: AttendanceStatus::Present,
            date: day1,
        },
    )
    .await
    .unwrap();

    let err = AttendanceService::mark_student(
        &pool,
        fx.student_id,
        &StudentAttendanceRequest {
            subject_id: fx.subject_id,
            status: AttendanceStatus::Present,
            date: day2,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(record_count(&pool, fx.student_id).await, 1);

    // Re-marking the already-recorded day overwrites instead of counting
    // against the cap.
    AttendanceService::mark_student(
        &pool,
        fx.student_id,
        &StudentAttendanceRequest {
            subject_id: fx.subject_id,
            status: AttendanceStatus::Absent,
            date: day1,
        },
    )
    .await
    .unwrap();
    assert_eq!(record_count(&pool, fx.student_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn second_batch_for_same_date_conflicts_without_a_second_session(pool: PgPool) {
    let fx = seed(&pool, 10).await;
    let req = MarkAttendanceRequest {
        class_id: fx.class_id,
        subject_id: fx.subject_id,
        date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        records: vec![StudentStatus {
            student_id: fx.student_id,
            status: AttendanceStatus::Present,
        }],
    };

    AttendanceService::mark_batch(&pool, &req).await.unwrap();
    let err = AttendanceService::mark_batch(&pool, &req).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let sessions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance_sessions WHERE subject_id = $1")
            .bind(fx.subject_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(sessions, 1);
    assert_eq!(record_count(&pool, fx.student_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn batch_rejects_student_from_another_class(pool: PgPool) {
    let fx = seed(&pool, 10).await;
    let other_class = SclassService::create(
        &pool,
        &CreateSclassRequest {
            sclass_name: "Grade 6".into(),
            school_id: fx.school_id,
        },
    )
    .await
    .unwrap();
    let outsider = StudentService::register(
        &pool,
        &RegisterStudentRequest {
            name: "Rohan Mehta".into(),
            roll_num: 1,
            password: "secret123".into(),
            sclass_id: other_class.id,
            school_id: fx.school_id,
            parent_email: "parent2@home.test".into(),
        },
    )
    .await
    .unwrap();

    let err = AttendanceService::mark_batch(
        &pool,
        &MarkAttendanceRequest {
            class_id: fx.class_id,
            subject_id: fx.subject_id,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            records: vec![StudentStatus {
                student_id: outsider.id,
                status: AttendanceStatus::Present,
            }],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // The rejected batch rolls back, so the date stays open.
    let sessions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance_sessions WHERE subject_id = $1")
            .bind(fx.subject_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(sessions, 0);
    assert_eq!(record_count(&pool, outsider.id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn second_payment_for_same_month_conflicts(pool: PgPool) {
    let fx = seed(&pool, 10).await;
    let details = FeeService::get_details(&pool, fx.student_id, 1000).await.unwrap();
    assert_eq!(details.fees.len(), 12);
    let month = details.fees[0].month.clone();

    let gateway = test_gateway("shared-secret");
    let req = PayFeeRequest {
        student_id: fx.student_id,
        month: month.clone(),
        payment_id: "pay_123".into(),
        order_id: "order_123".into(),
        signature: sign("shared-secret", "order_123", "pay_123"),
    };

    let paid = FeeService::pay(&pool, &gateway, &req).await.unwrap();
    assert!(paid.is_paid);
    assert!(paid.paid_date.is_some());

    let err = FeeService::pay(&pool, &gateway, &req).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn payment_with_bad_signature_is_rejected_unpaid(pool: PgPool) {
    let fx = seed(&pool, 10).await;
    let details = FeeService::get_details(&pool, fx.student_id, 1000).await.unwrap();
    let month = details.fees[0].month.clone();

    let gateway = test_gateway("shared-secret");
    let err = FeeService::pay(
        &pool,
        &gateway,
        &PayFeeRequest {
            student_id: fx.student_id,
            month: month.clone(),
            payment_id: "pay_123".into(),
            order_id: "order_123".into(),
            signature: sign("wrong-secret", "order_123", "pay_123"),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let is_paid: bool =
        sqlx::query_scalar("SELECT is_paid FROM fees WHERE student_id = $1 AND month = $2")
            .bind(fx.student_id)
            .bind(&month)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!is_paid);
}

#[sqlx::test(migrations = "./migrations")]
async fn student_can_submit_an_assignment_only_once(pool: PgPool) {
    let fx = seed(&pool, 10).await;
    let assignment = AssignmentService::post(
        &pool,
        &PostAssignmentRequest {
            class_id: fx.class_id,
            subject_id: fx.subject_id,
            deadline: Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(),
            description: "Chapter 3 exercises".into(),
            file_url: "http://localhost:5000/uploads/teachers/a.pdf".into(),
        },
    )
    .await
    .unwrap();

    let req = SubmitAssignmentRequest {
        assignment_id: assignment.id,
        student_id: fx.student_id,
        name: "Aditi Sharma".into(),
        roll_num: 1,
        file: "http://localhost:5000/uploads/students/b.pdf".into(),
    };
    AssignmentService::submit(&pool, &req).await.unwrap();

    let err = AssignmentService::submit(&pool, &req).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE assignment_id = $1")
            .bind(assignment.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_school_reference_is_a_validation_error(pool: PgPool) {
    let err = NoticeService::create(
        &pool,
        &CreateNoticeRequest {
            school_id: Uuid::new_v4(),
            title: "Sports day".into(),
            details: "Postponed to Friday".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
