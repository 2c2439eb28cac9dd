pub mod appointments;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::templates_structs::ApiErrorResponse;

/// Mutations (POST/PUT/DELETE) must be sent as `application/json`.
///
/// A plain HTML form cannot produce that content type cross-origin, so this
/// stands in for the form CSRF token on the JSON routes. Reads pass through.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = ApiErrorResponse::message(
                "Content-Type must be application/json for mutation requests",
            );
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/appointments")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(appointments::list))
            .route("", web::post().to(appointments::create))
            .route("/{id}", web::get().to(appointments::read))
            .route("/{id}", web::put().to(appointments::update))
            .route("/{id}", web::delete().to(appointments::delete))
    );
}
