//! Inserts a long inactive mock student so that the next reminder sweep has
//! someone to remind.

use student_progress::telemetry::{get_subscriber, init_subscriber};
use student_progress_api::{execute, CreateStudentUseCase};
use student_progress_domain::{days_to_millis, Student};
use student_progress_infra::setup_context;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("seed_inactive_student".into(), "info".into());
    init_subscriber(subscriber);

    let email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "inactive.user@example.com".to_string());

    let context = setup_context().await?;
    let now = context.sys.get_timestamp_millis();

    let mut student = Student::new(
        "Test Inactive User".into(),
        email,
        "inactive_user_123".into(),
    );
    student.phone = Some("1234567890".into());
    student.current_rating = 1450;
    student.max_rating = 1650;
    student.last_submission_date = Some(now - days_to_millis(30));

    let student = execute(CreateStudentUseCase { student }, &context)
        .await
        .map_err(|e| anyhow::anyhow!("Could not insert mock student: {:?}", e))?;
    info!("Inactive mock student {} added", student.id);
    Ok(())
}
