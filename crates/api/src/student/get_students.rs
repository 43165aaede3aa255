use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use student_progress_api_structs::get_students::*;
use student_progress_domain::Student;
use student_progress_infra::ProgressContext;

pub async fn get_students_controller(
    ctx: web::Data<ProgressContext>,
) -> Result<HttpResponse, ApiError> {
    execute(GetStudentsUseCase {}, &ctx)
        .await
        .map(|students| HttpResponse::Ok().json(APIResponse::new(students)))
        .map_err(|e| match e {
            UseCaseError::StorageError(_) => ApiError::InternalError,
        })
}

#[derive(Debug)]
struct GetStudentsUseCase {}

#[derive(Debug)]
enum UseCaseError {
    StorageError(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetStudentsUseCase {
    type Response = Vec<Student>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetStudents";

    async fn execute(&mut self, ctx: &ProgressContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .students
            .find_all()
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
