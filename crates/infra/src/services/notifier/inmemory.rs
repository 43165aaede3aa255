use super::{INotifier, NotifierError};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentReminder {
    pub email: String,
    pub name: String,
}

/// Notifier that keeps sent reminders in memory. Deliveries to the addresses
/// in `failing_addresses` are rejected.
pub struct InMemoryNotifier {
    sent: Mutex<Vec<SentReminder>>,
    failing_addresses: Mutex<HashSet<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_addresses: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_deliveries_to(&self, email: &str) {
        self.failing_addresses
            .lock()
            .unwrap()
            .insert(email.to_string());
    }

    pub fn sent(&self) -> Vec<SentReminder> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn send(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        if self.failing_addresses.lock().unwrap().contains(email) {
            return Err(NotifierError::Rejected {
                status: 422,
                message: format!("Invalid recipient: {}", email),
            });
        }
        self.sent.lock().unwrap().push(SentReminder {
            email: email.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }
}
