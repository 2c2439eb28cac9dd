use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::appointment::{FormEcho, FormErrors};
use crate::models::list_query::{ListParams, ListPlan};
use super::helpers::{render_index, IndexPage, Selection};

/// GET / - list, first appointment selected, empty create form.
pub async fn home(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let plan = ListPlan::from(&*query);
    let page = IndexPage {
        plan: &plan,
        selection: Selection::First,
        form: FormEcho::blank(),
        errors: FormErrors::default(),
        status: StatusCode::OK,
    };
    render_index(&pool, &session, &config, page).await
}

/// GET /appointments/{id} - same page with the given appointment selected.
/// An unknown id is not an error; the detail pane is just empty.
pub async fn show(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let plan = ListPlan::from(&*query);
    let page = IndexPage {
        plan: &plan,
        selection: Selection::Id(path.into_inner()),
        form: FormEcho::blank(),
        errors: FormErrors::default(),
        status: StatusCode::OK,
    };
    render_index(&pool, &session, &config, page).await
}
