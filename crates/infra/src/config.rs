use student_progress_domain::INACTIVITY_THRESHOLD_DAYS;
use tracing::{info, warn};

/// Credentials and location of the transactional email HTTP API used to
/// deliver reminder emails
#[derive(Debug, Clone)]
pub struct EmailApiConfig {
    pub base_url: String,
    pub token: String,
    /// Address the reminders are sent from
    pub sender: String,
    /// Upper bound for a single delivery request in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Days without a submission before a student is reminded
    pub inactivity_threshold_days: i64,
    /// Hour of the day (UTC) at which the daily reminder sweep runs
    pub reminder_sweep_hour_utc: u32,
    /// `None` if the email API is not configured, in which case reminders
    /// can not be delivered
    pub email_api: Option<EmailApiConfig>,
}

fn parse_env_or_default<T: std::str::FromStr + std::fmt::Display + Copy>(
    key: &str,
    default: T,
) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env_or_default("PORT", 5000);

        let mut reminder_sweep_hour_utc = parse_env_or_default("REMINDER_SWEEP_HOUR_UTC", 2);
        if reminder_sweep_hour_utc > 23 {
            warn!(
                "The given REMINDER_SWEEP_HOUR_UTC: {} is not an hour of the day, falling back to the default: 2.",
                reminder_sweep_hour_utc
            );
            reminder_sweep_hour_utc = 2;
        }

        let email_api = match (
            std::env::var("EMAIL_API_BASE_URL"),
            std::env::var("EMAIL_API_TOKEN"),
            std::env::var("EMAIL_SENDER"),
        ) {
            (Ok(base_url), Ok(token), Ok(sender)) => Some(EmailApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                token,
                sender,
                timeout_secs: parse_env_or_default("EMAIL_TIMEOUT_SECS", 10),
            }),
            _ => {
                info!("Did not find EMAIL_API_BASE_URL, EMAIL_API_TOKEN and EMAIL_SENDER environment variables. Reminder emails will not be delivered.");
                None
            }
        };

        Self {
            port,
            inactivity_threshold_days: INACTIVITY_THRESHOLD_DAYS,
            reminder_sweep_hour_utc,
            email_api,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
