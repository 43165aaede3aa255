use actix_web::{web, HttpResponse};
use student_progress_api_structs::get_service_health::*;
use student_progress_infra::ProgressContext;

async fn status(ctx: web::Data<ProgressContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        email_delivery_configured: ctx.config.email_api.is_some(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
