//! Shared page assembly for the appointment handlers.
//!
//! The list page doubles as the create form, so both the read handlers and
//! a rejected create need to build the same view.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::{render_with_status, AppError};
use crate::models::appointment::{self, Appointment, FormEcho, FormErrors};
use crate::models::list_query::ListPlan;
use crate::templates_structs::{AppointmentIndexTemplate, AppointmentListItem, PageContext};

/// Which record the detail pane shows.
pub enum Selection {
    /// The first row of the list, if any.
    First,
    /// A specific id; an unknown id shows no detail.
    Id(i64),
    None,
}

pub struct IndexPage<'a> {
    pub plan: &'a ListPlan,
    pub selection: Selection,
    pub form: FormEcho,
    pub errors: FormErrors,
    pub status: StatusCode,
}

pub async fn render_index(
    pool: &PgPool,
    session: &Session,
    config: &AppConfig,
    page: IndexPage<'_>,
) -> Result<HttpResponse, AppError> {
    let rows = appointment::list(pool, &page.plan.spec).await?;

    let selected: Option<Appointment> = match page.selection {
        Selection::First => rows.first().cloned(),
        Selection::Id(id) => match rows.iter().find(|a| a.id == id) {
            Some(found) => Some(found.clone()),
            // Filtered out of the list but still viewable.
            None => appointment::find_by_id(pool, id).await?,
        },
        Selection::None => None,
    };
    let selected_id = selected.as_ref().map(|a| a.id);

    let tmpl = AppointmentIndexTemplate {
        ctx: PageContext::build(session, config),
        appointments: AppointmentListItem::build_all(rows, &page.plan.state, selected_id),
        selected,
        view: page.plan.state.clone(),
        links: page.plan.links.clone(),
        form: page.form,
        errors: page.errors,
    };
    render_with_status(tmpl, page.status)
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}
