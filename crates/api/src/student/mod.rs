mod create_student;
mod delete_student;
mod get_student;
mod get_students;
mod toggle_student_reminder;
mod update_student;

use actix_web::web;
use create_student::create_student_controller;
use delete_student::delete_student_controller;
use get_student::get_student_controller;
use get_students::get_students_controller;
use student_progress_domain::Student;
use toggle_student_reminder::toggle_student_reminder_controller;
use update_student::update_student_controller;

pub use create_student::CreateStudentUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/students", web::get().to(get_students_controller));
    cfg.route("/students", web::post().to(create_student_controller));
    cfg.route("/students/{student_id}", web::get().to(get_student_controller));
    cfg.route(
        "/students/{student_id}",
        web::put().to(update_student_controller),
    );
    cfg.route(
        "/students/{student_id}",
        web::delete().to(delete_student_controller),
    );
    cfg.route(
        "/students/{student_id}/reminder-toggle",
        web::put().to(toggle_student_reminder_controller),
    );
}

/// Checks the fields a client is allowed to set on a `Student`
fn validate_student(student: &Student) -> Result<(), String> {
    if student.name.trim().is_empty() {
        return Err("Student name is required".into());
    }
    if student.handle.trim().is_empty() {
        return Err("Codeforces handle is required".into());
    }
    let email = student.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(format!("Invalid email address: {}", student.email)),
    }
    if student.reminders_sent < 0 {
        return Err("remindersSent can not be negative".into());
    }
    Ok(())
}
