mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailApiConfig};
pub use repos::{IStudentRepo, InMemoryStudentRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ProgressContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl ProgressContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("Did not find DATABASE_URL environment variable. Students will only be stored in memory.");
                Repos::create_inmemory()
            }
        };
        let notifier = create_notifier(&config)?;

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        })
    }

    /// Context backed by inmemory repos and the given notifier, which is useful for tests
    pub fn create_inmemory(config: Config, notifier: Arc<dyn INotifier>) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }
}

fn create_notifier(config: &Config) -> anyhow::Result<Arc<dyn INotifier>> {
    match &config.email_api {
        Some(email_api) => {
            info!("Reminder emails will be sent through {}", email_api.base_url);
            let notifier =
                EmailApiNotifier::new(email_api.clone(), config.inactivity_threshold_days)?;
            Ok(Arc::new(notifier))
        }
        None => Ok(Arc::new(DisabledNotifier {})),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ProgressContext> {
    ProgressContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}
