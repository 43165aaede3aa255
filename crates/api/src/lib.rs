mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;
mod student;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use job_schedulers::{millis_until_next_daily_run, ReminderJobHandle, ReminderJobScheduler};
pub use reminder::run_reminder_sweep::{RunReminderSweepUseCase, UseCaseError as SweepError};
pub use shared::usecase::{execute, UseCase};
pub use student::CreateStudentUseCase;
use std::net::TcpListener;
use student_progress_infra::ProgressContext;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    student::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    reminder_job: ReminderJobHandle,
}

impl Application {
    pub async fn new(context: ProgressContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let reminder_job = Application::start_job_schedulers(context);

        Ok(Self {
            server,
            port,
            reminder_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: ProgressContext) -> ReminderJobHandle {
        ReminderJobScheduler::new(context).start()
    }

    async fn configure_server(context: ProgressContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.reminder_job.stop();
        res
    }
}
