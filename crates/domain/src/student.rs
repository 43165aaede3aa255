use crate::shared::entity::{Entity, ID};

/// Number of days without a recorded submission after which a `Student`
/// becomes eligible for an inactivity reminder.
pub const INACTIVITY_THRESHOLD_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Converts a number of days to millis
pub fn days_to_millis(days: i64) -> i64 {
    days * MILLIS_PER_DAY
}

/// A `Student` tracked for competitive programming activity on Codeforces.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: ID,
    pub name: String,
    /// Address the inactivity reminders are sent to
    pub email: String,
    pub phone: Option<String>,
    /// Codeforces handle
    pub handle: String,
    pub current_rating: i64,
    pub max_rating: i64,
    /// Timestamp in millis of the most recent recorded submission.
    /// `None` means that no submission has ever been recorded.
    pub last_submission_date: Option<i64>,
    /// Number of reminders that have been successfully sent to this `Student`
    pub reminders_sent: i64,
    /// Opt-in flag for inactivity reminders
    pub allow_reminder: bool,
    /// Timestamp in millis of the most recent successfully sent reminder
    pub last_reminder_sent_at: Option<i64>,
}

impl Student {
    pub fn new(name: String, email: String, handle: String) -> Self {
        Self {
            id: Default::default(),
            name,
            email,
            phone: None,
            handle,
            current_rating: 0,
            max_rating: 0,
            last_submission_date: None,
            reminders_sent: 0,
            allow_reminder: true,
            last_reminder_sent_at: None,
        }
    }

    /// The cutoff timestamp for a sweep running at `now`. Students with a last
    /// submission strictly before this timestamp are inactive.
    pub fn inactivity_cutoff(now: i64, threshold_millis: i64) -> i64 {
        now - threshold_millis
    }

    pub fn is_eligible_for_reminder(&self, now: i64, threshold_millis: i64) -> bool {
        if !self.allow_reminder {
            return false;
        }
        match self.last_submission_date {
            None => true,
            Some(last_submission) => {
                last_submission < Self::inactivity_cutoff(now, threshold_millis)
            }
        }
    }

    /// Bookkeeping after a reminder was delivered at `now`
    pub fn record_reminder_sent(&mut self, now: i64) {
        self.reminders_sent += 1;
        self.last_reminder_sent_at = Some(now);
    }

    pub fn toggle_reminder(&mut self) {
        self.allow_reminder = !self.allow_reminder;
    }
}

impl Entity<ID> for Student {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
