use super::{template::SENDER_NAME, INotifier, NotifierError, ReminderEmail};
use crate::config::EmailApiConfig;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

/// Delivers reminders through a transactional email HTTP API
pub struct EmailApiNotifier {
    client: Client,
    config: EmailApiConfig,
    threshold_days: i64,
}

impl EmailApiNotifier {
    pub fn new(config: EmailApiConfig, threshold_days: i64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            threshold_days,
        })
    }
}

#[async_trait::async_trait]
impl INotifier for EmailApiNotifier {
    async fn send(&self, email: &str, name: &str) -> Result<(), NotifierError> {
        let reminder = ReminderEmail::new(name, self.threshold_days);
        let body = SendEmailRequest {
            from: format!("\"{}\" <{}>", SENDER_NAME, self.config.sender),
            to: email,
            subject: &reminder.subject,
            html_body: &reminder.html_body,
            text_body: &reminder.text_body,
        };

        let res = self
            .client
            .post(&format!("{}/email", self.config.base_url))
            .header("authorization", format!("Bearer {}", self.config.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Email API POST error. Error message: {:?}",
                    e
                );
                NotifierError::Network(e.to_string())
            })?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        let message = res.text().await.unwrap_or_default();
        error!(
            "[Unexpected Response] Email API POST error. Status: {}, message: {}",
            status, message
        );
        Err(NotifierError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
