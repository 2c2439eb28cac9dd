pub mod api_v1;
pub mod appointment_handlers;

use actix_web::{web, HttpResponse};

/// All application routes. Static files and session middleware are added by
/// the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Appointment pages
        .route("/", web::get().to(appointment_handlers::home))
        .route("/appointments", web::post().to(appointment_handlers::create))
        .route("/appointments/{id}", web::get().to(appointment_handlers::show))
        .route("/appointments/{id}/edit", web::get().to(appointment_handlers::edit_form))
        .route("/appointments/{id}/update", web::post().to(appointment_handlers::update))
        .route("/appointments/{id}/delete", web::post().to(appointment_handlers::delete))
        // JSON API
        .service(web::scope("/api/v1").configure(api_v1::configure));
}

/// Fallback for unmatched routes (register last).
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
