use serde::{Deserialize, Serialize};
use student_progress_domain::{Student, ID};

use crate::dtos::StudentDTO;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub student: StudentDTO,
}

impl StudentResponse {
    pub fn new(student: Student) -> Self {
        Self {
            student: StudentDTO::new(student),
        }
    }
}

#[derive(Deserialize)]
pub struct StudentPathParams {
    pub student_id: ID,
}

pub mod create_student {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub email: String,
        pub handle: String,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub current_rating: Option<i64>,
        #[serde(default)]
        pub max_rating: Option<i64>,
        #[serde(default)]
        pub last_submission_date: Option<i64>,
        #[serde(default)]
        pub reminders_sent: Option<i64>,
        #[serde(default)]
        pub allow_reminder: Option<bool>,
        #[serde(default)]
        pub last_reminder_sent_at: Option<i64>,
    }

    pub type APIResponse = StudentResponse;
}

pub mod update_student {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub handle: Option<String>,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub current_rating: Option<i64>,
        #[serde(default)]
        pub max_rating: Option<i64>,
        #[serde(default)]
        pub last_submission_date: Option<i64>,
        #[serde(default)]
        pub allow_reminder: Option<bool>,
    }

    pub type PathParams = StudentPathParams;

    pub type APIResponse = StudentResponse;
}

pub mod get_student {
    use super::*;

    pub type PathParams = StudentPathParams;

    pub type APIResponse = StudentResponse;
}

pub mod delete_student {
    use super::*;

    pub type PathParams = StudentPathParams;

    pub type APIResponse = StudentResponse;
}

pub mod toggle_student_reminder {
    use super::*;

    pub type PathParams = StudentPathParams;

    pub type APIResponse = StudentResponse;
}

pub mod get_students {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub students: Vec<StudentDTO>,
    }

    impl APIResponse {
        pub fn new(students: Vec<Student>) -> Self {
            Self {
                students: students.into_iter().map(StudentDTO::new).collect(),
            }
        }
    }
}
