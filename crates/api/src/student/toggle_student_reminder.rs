use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use student_progress_api_structs::toggle_student_reminder::*;
use student_progress_domain::{Student, ID};
use student_progress_infra::ProgressContext;

pub async fn toggle_student_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ProgressContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = ToggleStudentReminderUseCase {
        student_id: path_params.student_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|student| HttpResponse::Ok().json(APIResponse::new(student)))
        .map_err(|e| match e {
            UseCaseError::NotFound(id) => {
                ApiError::NotFound(format!("A student with id: {}, was not found.", id))
            }
            UseCaseError::StorageError(_) => ApiError::InternalError,
        })
}

/// Turns inactivity reminders on or off for a `Student`
#[derive(Debug)]
pub struct ToggleStudentReminderUseCase {
    pub student_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for ToggleStudentReminderUseCase {
    type Response = Student;
    type Error = UseCaseError;

    const NAME: &'static str = "ToggleStudentReminder";

    async fn execute(&mut self, ctx: &ProgressContext) -> Result<Self::Response, Self::Error> {
        let mut student = match ctx.repos.students.find(&self.student_id).await {
            Some(student) => student,
            None => return Err(UseCaseError::NotFound(self.student_id.clone())),
        };

        student.toggle_reminder();

        ctx.repos
            .students
            .save(&student)
            .await
            .map(|_| student)
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
