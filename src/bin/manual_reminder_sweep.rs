//! Runs a single reminder sweep outside of the daily schedule and prints the
//! resulting report.

use student_progress::telemetry::{get_subscriber, init_subscriber};
use student_progress_api::{execute, RunReminderSweepUseCase};
use student_progress_api_structs::dtos::SweepReportDTO;
use student_progress_infra::setup_context;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("manual_reminder_sweep".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await?;
    info!("Connected. Running reminder sweep ...");

    let report = execute(RunReminderSweepUseCase {}, &context)
        .await
        .map_err(|e| anyhow::anyhow!("Reminder sweep failed: {:?}", e))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&SweepReportDTO::new(report))?
    );
    Ok(())
}
