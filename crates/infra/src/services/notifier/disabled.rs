use super::{INotifier, NotifierError};
use tracing::warn;

/// Used when no email provider is configured. Every delivery fails so that
/// sweeps never record reminders that were not sent.
pub struct DisabledNotifier {}

#[async_trait::async_trait]
impl INotifier for DisabledNotifier {
    async fn send(&self, email: &str, _name: &str) -> Result<(), NotifierError> {
        warn!("Not sending reminder to {}: no email provider configured", email);
        Err(NotifierError::NotConfigured)
    }
}
