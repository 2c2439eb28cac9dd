use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::appointment::{self, AppointmentInput};
use crate::models::list_query::{ListParams, ListPlan};
use crate::templates_structs::{ApiErrorResponse, ApiListResponse};

fn not_found(id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse::message(format!("Appointment {id} not found")))
}

/// GET /api/v1/appointments - List with the same filter/sort/q semantics as the HTML list
pub async fn list(
    pool: web::Data<PgPool>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let plan = ListPlan::from(&*query);
    let items = appointment::list(&pool, &plan.spec).await?;

    Ok(HttpResponse::Ok().json(ApiListResponse {
        total: items.len(),
        items,
        view: plan.state,
        links: plan.links,
    }))
}

/// GET /api/v1/appointments/{id}
pub async fn read(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match appointment::find_by_id(&pool, id).await? {
        Some(appt) => Ok(HttpResponse::Ok().json(appt)),
        None => Ok(not_found(id)),
    }
}

/// POST /api/v1/appointments - Create; 422 with the error map when invalid
pub async fn create(
    pool: web::Data<PgPool>,
    body: web::Json<AppointmentInput>,
) -> Result<HttpResponse, AppError> {
    let new = match appointment::validate(&body).into_record() {
        Ok(new) => new,
        Err((errors, _)) => {
            return Ok(HttpResponse::UnprocessableEntity().json(ApiErrorResponse::validation(errors)));
        }
    };

    let id = appointment::create(&pool, &new).await?;
    log::info!("Created appointment {id} via API");

    let created = appointment::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/api/v1/appointments/{id}")))
        .json(created))
}

/// PUT /api/v1/appointments/{id} - Replace every field
pub async fn update(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    body: web::Json<AppointmentInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let changes = match appointment::validate(&body).into_record() {
        Ok(changes) => changes,
        Err((errors, _)) => {
            return Ok(HttpResponse::UnprocessableEntity().json(ApiErrorResponse::validation(errors)));
        }
    };

    if appointment::update(&pool, id, &changes).await? == 0 {
        return Ok(not_found(id));
    }
    log::info!("Updated appointment {id} via API");

    let updated = appointment::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/appointments/{id}
pub async fn delete(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if appointment::delete(&pool, id).await? == 0 {
        return Ok(not_found(id));
    }
    log::info!("Deleted appointment {id} via API");
    Ok(HttpResponse::NoContent().finish())
}
