use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use student_progress_api_structs::get_student::*;
use student_progress_domain::{Student, ID};
use student_progress_infra::ProgressContext;

pub async fn get_student_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ProgressContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetStudentUseCase {
        student_id: path_params.student_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|student| HttpResponse::Ok().json(APIResponse::new(student)))
        .map_err(|e| match e {
            UseCaseError::NotFound(id) => {
                ApiError::NotFound(format!("A student with id: {}, was not found.", id))
            }
        })
}

#[derive(Debug)]
struct GetStudentUseCase {
    student_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetStudentUseCase {
    type Response = Student;
    type Error = UseCaseError;

    const NAME: &'static str = "GetStudent";

    async fn execute(&mut self, ctx: &ProgressContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.students.find(&self.student_id).await {
            Some(student) => Ok(student),
            None => Err(UseCaseError::NotFound(self.student_id.clone())),
        }
    }
}
