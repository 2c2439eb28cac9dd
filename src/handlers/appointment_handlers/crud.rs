use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::{render, render_with_status, AppError};
use crate::models::appointment::{self, AppointmentInput, FormEcho, FormErrors};
use crate::models::list_query::ListPlan;
use crate::session::{csrf, flash};
use crate::templates_structs::{AppointmentEditTemplate, PageContext};
use super::helpers::{render_index, see_other, IndexPage, Selection};

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// POST /appointments
pub async fn create(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<AppointmentInput>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let new = match appointment::validate(&form).into_record() {
        Ok(new) => new,
        Err((errors, echo)) => {
            log::debug!("Rejected new appointment: {:?}", errors.keys());
            let plan = ListPlan::new(None, None, None);
            let page = IndexPage {
                plan: &plan,
                selection: Selection::None,
                form: echo,
                errors,
                status: StatusCode::UNPROCESSABLE_ENTITY,
            };
            return render_index(&pool, &session, &config, page).await;
        }
    };

    let id = appointment::create(&pool, &new).await?;
    log::info!("Created appointment {id} '{}'", new.title);

    flash::set_flash(&session, "Appointment created");
    Ok(see_other(&format!("/appointments/{id}")))
}

/// GET /appointments/{id}/edit
pub async fn edit_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let record = appointment::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let tmpl = AppointmentEditTemplate {
        ctx: PageContext::build(&session, &config),
        appointment_id: id,
        form_action: format!("/appointments/{id}/update"),
        form: FormEcho::from_record(&record),
        errors: FormErrors::default(),
    };
    render(tmpl)
}

/// POST /appointments/{id}/update
pub async fn update(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<AppointmentInput>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();

    let changes = match appointment::validate(&form).into_record() {
        Ok(changes) => changes,
        Err((errors, echo)) => {
            log::debug!("Rejected update of appointment {id}: {:?}", errors.keys());
            let tmpl = AppointmentEditTemplate {
                ctx: PageContext::build(&session, &config),
                appointment_id: id,
                form_action: format!("/appointments/{id}/update"),
                form: echo,
                errors,
            };
            return render_with_status(tmpl, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    if appointment::update(&pool, id, &changes).await? == 0 {
        log::info!("Update of missing appointment {id}");
        flash::set_flash(&session, "Appointment not found");
        return Ok(see_other("/"));
    }

    log::info!("Updated appointment {id}");
    flash::set_flash(&session, "Appointment updated");
    Ok(see_other(&format!("/appointments/{id}")))
}

/// POST /appointments/{id}/delete
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    if appointment::delete(&pool, id).await? == 0 {
        log::info!("Delete of missing appointment {id}");
        flash::set_flash(&session, "Appointment not found");
    } else {
        log::info!("Deleted appointment {id}");
        flash::set_flash(&session, "Appointment deleted");
    }
    Ok(see_other("/"))
}
