use super::validate_student;
use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use student_progress_api_structs::update_student::*;
use student_progress_domain::{Student, ID};
use student_progress_infra::ProgressContext;

pub async fn update_student_controller(
    body: web::Json<RequestBody>,
    path: web::Path<PathParams>,
    ctx: web::Data<ProgressContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = UpdateStudentUseCase {
        student_id: path.into_inner().student_id,
        changes: body.into_inner(),
    };

    execute(usecase, &ctx)
        .await
        .map(|student| HttpResponse::Ok().json(APIResponse::new(student)))
        .map_err(ApiError::from)
}

/// Updates the profile of a `Student`. The reminder bookkeeping fields are
/// owned by the reminder sweep and can not be changed here.
#[derive(Debug)]
pub struct UpdateStudentUseCase {
    pub student_id: ID,
    pub changes: RequestBody,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidStudent(String),
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A student with id: {}, was not found.", id))
            }
            UseCaseError::InvalidStudent(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateStudentUseCase {
    type Response = Student;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateStudent";

    async fn execute(&mut self, ctx: &ProgressContext) -> Result<Self::Response, Self::Error> {
        let mut student = match ctx.repos.students.find(&self.student_id).await {
            Some(student) => student,
            None => return Err(UseCaseError::NotFound(self.student_id.clone())),
        };

        let changes = &self.changes;
        if let Some(name) = &changes.name {
            student.name = name.clone();
        }
        if let Some(email) = &changes.email {
            student.email = email.clone();
        }
        if let Some(handle) = &changes.handle {
            student.handle = handle.clone();
        }
        if let Some(phone) = &changes.phone {
            student.phone = Some(phone.clone());
        }
        if let Some(current_rating) = changes.current_rating {
            student.current_rating = current_rating;
        }
        if let Some(max_rating) = changes.max_rating {
            student.max_rating = max_rating;
        }
        if let Some(last_submission_date) = changes.last_submission_date {
            student.last_submission_date = Some(last_submission_date);
        }
        if let Some(allow_reminder) = changes.allow_reminder {
            student.allow_reminder = allow_reminder;
        }

        validate_student(&student).map_err(UseCaseError::InvalidStudent)?;

        ctx.repos
            .students
            .save(&student)
            .await
            .map(|_| student)
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
