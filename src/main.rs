use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schoolverse_api::{config::Config, db, routes, services::payment::PaymentGateway, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let gateway = Arc::new(PaymentGateway::new(&config));

    let state = AppState {
        db: pool,
        config: config.clone(),
        gateway,
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_origin(AllowOrigin::any());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        // Admin
        .route("/admin/register", post(routes::admin::register))
        .route("/admin/login", post(routes::admin::login))
        .route("/admin/{id}", get(routes::admin::detail).delete(routes::admin::delete))
        .route("/admin/{id}/fee-collection", get(routes::admin::fee_collection))
        // Students
        .route("/students/register", post(routes::student::register))
        .route("/students/login", post(routes::student::login))
        .route("/students/school/{id}", get(routes::student::list_by_school).delete(routes::student::delete_by_school))
        .route("/students/class/{id}", delete(routes::student::delete_by_class))
        .route("/students/{id}", get(routes::student::detail).put(routes::student::update).delete(routes::student::delete))
        .route("/students/{id}/exam-result", put(routes::student::update_exam_result))
        .route("/students/{id}/assignments", get(routes::student::all_assignments))
        .route("/students/{id}/assignments/{subject_id}", get(routes::student::subject_assignments))
        .route("/students/{id}/fees", get(routes::fee::details))
        // Student attendance (per-student view of the single ledger)
        .route("/students/{id}/attendance", put(routes::attendance::mark_student).delete(routes::attendance::clear_student))
        .route("/students/{id}/attendance/subject", delete(routes::attendance::clear_student_subject))
        .route("/schools/{id}/attendance", delete(routes::attendance::clear_school))
        .route("/subjects/{id}/attendance", delete(routes::attendance::clear_subject))
        // Date-scoped attendance
        .route("/attendance", post(routes::attendance::mark_batch))
        .route("/attendance/{class_id}/{subject_id}/{date}", get(routes::attendance::by_date))
        .route("/attendance/percentage/{student_id}/{subject_id}", get(routes::attendance::percentage))
        // Fees
        .route("/fees/create-order", post(routes::fee::create_order))
        .route("/fees/pay", post(routes::fee::pay))
        // Teachers
        .route("/teachers/register", post(routes::teacher::register))
        .route("/teachers/login", post(routes::teacher::login))
        .route("/teachers/school/{id}", get(routes::teacher::list_by_school).delete(routes::teacher::delete_by_school))
        .route("/teachers/class/{id}", delete(routes::teacher::delete_by_class))
        .route("/teachers/subject", put(routes::teacher::update_subject))
        .route("/teachers/send-complaint", post(routes::teacher::send_complaint))
        .route("/teachers/{id}", get(routes::teacher::detail).delete(routes::teacher::delete))
        .route("/teachers/{id}/attendance", post(routes::teacher::mark_attendance))
        // Assignments
        .route("/assignments", post(routes::assignment::post))
        .route("/assignments/submit", post(routes::assignment::submit))
        .route("/assignments/class/{class_id}/subject/{subject_id}", get(routes::assignment::by_class_and_subject))
        .route("/assignments/{id}/submissions", get(routes::assignment::submissions))
        // Notices
        .route("/notices", post(routes::notice::create))
        .route("/notices/school/{id}", get(routes::notice::list).delete(routes::notice::delete_by_school))
        .route("/notices/{id}", put(routes::notice::update).delete(routes::notice::delete))
        // Complaints
        .route("/complaints", post(routes::complaint::create))
        .route("/complaints/school/{id}", get(routes::complaint::list))
        // Classes
        .route("/sclasses", post(routes::sclass::create))
        .route("/sclasses/school/{id}", get(routes::sclass::list).delete(routes::sclass::delete_by_school))
        .route("/sclasses/{id}", get(routes::sclass::detail).delete(routes::sclass::delete))
        .route("/sclasses/{id}/students", get(routes::sclass::students))
        // Subjects
        .route("/subjects", post(routes::subject::create))
        .route("/subjects/school/{id}", get(routes::subject::all_by_school).delete(routes::subject::delete_by_school))
        .route("/subjects/school/{id}/free", get(routes::subject::free_by_school))
        .route("/subjects/class/{id}", get(routes::subject::by_class).delete(routes::subject::delete_by_class))
        .route("/subjects/{id}", get(routes::subject::detail).delete(routes::subject::delete))
        // Uploads
        .route("/uploads/{namespace}", post(routes::upload::upload))
        .route("/uploads/{namespace}/{filename}", get(routes::upload::serve))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Covers the 10 MB upload cap with room for multipart framing
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("schoolverse API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
