use super::validate_student;
use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use student_progress_api_structs::create_student::*;
use student_progress_domain::Student;
use student_progress_infra::ProgressContext;

pub async fn create_student_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ProgressContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let mut student = Student::new(body.name, body.email, body.handle);
    student.phone = body.phone;
    student.current_rating = body.current_rating.unwrap_or_default();
    student.max_rating = body.max_rating.unwrap_or_default();
    student.last_submission_date = body.last_submission_date;
    student.reminders_sent = body.reminders_sent.unwrap_or_default();
    student.allow_reminder = body.allow_reminder.unwrap_or(true);
    student.last_reminder_sent_at = body.last_reminder_sent_at;

    let usecase = CreateStudentUseCase { student };

    execute(usecase, &ctx)
        .await
        .map(|student| HttpResponse::Created().json(APIResponse::new(student)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateStudentUseCase {
    pub student: Student,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidStudent(String),
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidStudent(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateStudentUseCase {
    type Response = Student;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateStudent";

    async fn execute(&mut self, ctx: &ProgressContext) -> Result<Self::Response, Self::Error> {
        validate_student(&self.student).map_err(UseCaseError::InvalidStudent)?;

        ctx.repos
            .students
            .insert(&self.student)
            .await
            .map(|_| self.student.clone())
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
