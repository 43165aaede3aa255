use std::sync::Arc;
use student_progress_api::Application;
use student_progress_domain::INACTIVITY_THRESHOLD_DAYS;
use student_progress_infra::{Config, InMemoryNotifier, ProgressContext, StaticTimeSys};

// Tue Nov 14 2023 03:00:00 GMT+0000, an hour after the daily sweep
pub const NOW: i64 = 1_699_930_800_000;

pub struct TestApp {
    pub address: String,
    pub notifier: Arc<InMemoryNotifier>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let notifier = Arc::new(InMemoryNotifier::new());
    let config = Config {
        port: 0, // Random port
        inactivity_threshold_days: INACTIVITY_THRESHOLD_DAYS,
        reminder_sweep_hour_utc: 2,
        email_api: None,
    };
    let mut ctx = ProgressContext::create_inmemory(config, notifier.clone());
    ctx.sys = Arc::new(StaticTimeSys(NOW));

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        notifier,
        client: reqwest::Client::new(),
    }
}
