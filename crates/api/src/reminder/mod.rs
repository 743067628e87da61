mod acknowledge_reminder;
mod create_reminder;
mod delete_reminder;
mod get_reminder;
mod get_reminders;
pub mod scan_reminders;
mod update_reminder;

use acknowledge_reminder::acknowledge_reminder_controller;
use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
use scan_reminders::scan_reminders_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));

    cfg.route("/reminders/scan", web::post().to(scan_reminders_controller));

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::patch().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );

    // Public, the token is the only credential
    cfg.route(
        "/acknowledge/{token}",
        web::get().to(acknowledge_reminder_controller),
    );
}
