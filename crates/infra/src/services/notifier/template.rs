pub const REMINDER_SUBJECT: &str = "Codeforces Activity Reminder";
pub const SENDER_NAME: &str = "Student Progress";

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The fixed inactivity reminder email
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl ReminderEmail {
    pub fn new(name: &str, threshold_days: i64) -> Self {
        let html_body = format!(
            "<p>Hello {name},</p>\
             <p>We noticed that you haven't made any Codeforces submissions in the last {days} days.</p>\
             <p>Keep practicing to stay on track!</p>\
             <p>- Student Progress Management System</p>",
            name = escape_html(name),
            days = threshold_days
        );
        let text_body = format!(
            "Hello {name},\n\n\
             We noticed that you haven't made any Codeforces submissions in the last {days} days.\n\n\
             Keep practicing to stay on track!\n\n\
             - Student Progress Management System\n",
            name = name,
            days = threshold_days
        );
        Self {
            subject: REMINDER_SUBJECT.to_string(),
            html_body,
            text_body,
        }
    }
}
