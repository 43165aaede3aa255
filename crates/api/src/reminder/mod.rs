pub mod run_reminder_sweep;

use actix_web::web;
use run_reminder_sweep::run_reminder_sweep_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/sweep",
        web::post().to(run_reminder_sweep_controller),
    );
}
