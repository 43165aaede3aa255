use serde::{Deserialize, Serialize};
use student_progress_domain::{Student, ID};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDTO {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub handle: String,
    pub current_rating: i64,
    pub max_rating: i64,
    pub last_submission_date: Option<i64>,
    pub reminders_sent: i64,
    pub allow_reminder: bool,
    pub last_reminder_sent_at: Option<i64>,
}

impl StudentDTO {
    pub fn new(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            phone: student.phone,
            handle: student.handle,
            current_rating: student.current_rating,
            max_rating: student.max_rating,
            last_submission_date: student.last_submission_date,
            reminders_sent: student.reminders_sent,
            allow_reminder: student.allow_reminder,
            last_reminder_sent_at: student.last_reminder_sent_at,
        }
    }
}
