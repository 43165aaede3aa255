use super::setup::TestApp;
use serde_json::{json, Value};
use student_progress_api_structs::dtos::StudentDTO;

pub fn student_body(name: &str, last_submission_date: Option<i64>, allow_reminder: bool) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "handle": format!("{}_cf", name.to_lowercase()),
        "lastSubmissionDate": last_submission_date,
        "allowReminder": allow_reminder,
    })
}

pub async fn create_student(app: &TestApp, body: &Value) -> StudentDTO {
    let res = app
        .client
        .post(app.url("/students"))
        .json(body)
        .send()
        .await
        .expect("Expected request to succeed");
    assert_eq!(res.status().as_u16(), 201);
    res.json::<student_progress_api_structs::create_student::APIResponse>()
        .await
        .expect("Expected student response")
        .student
}

pub async fn get_student(app: &TestApp, student: &StudentDTO) -> StudentDTO {
    app.client
        .get(app.url(&format!("/students/{}", student.id)))
        .send()
        .await
        .expect("Expected request to succeed")
        .json::<student_progress_api_structs::get_student::APIResponse>()
        .await
        .expect("Expected student response")
        .student
}
