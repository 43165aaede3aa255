mod disabled;
mod email_api;
mod inmemory;
mod template;

pub use disabled::DisabledNotifier;
pub use email_api::EmailApiNotifier;
pub use inmemory::{InMemoryNotifier, SentReminder};
pub use template::ReminderEmail;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("No email provider is configured")]
    NotConfigured,
    #[error("Could not reach the email provider: {0}")]
    Network(String),
    #[error("The email provider rejected the email with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Delivers inactivity reminders to students
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send(&self, email: &str, name: &str) -> Result<(), NotifierError>;
}
