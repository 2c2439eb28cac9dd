// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::config::AppConfig;
use crate::session::{csrf, flash};

mod api;
mod appointment;

pub use self::api::{ApiErrorResponse, ApiListResponse};
pub use self::appointment::{AppointmentEditTemplate, AppointmentIndexTemplate, AppointmentListItem};

/// Common context shared by all HTML pages.
/// Templates access these as `ctx.app_name`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: String,
    pub flash: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig) -> Self {
        PageContext {
            app_name: config.app_name.clone(),
            flash: flash::take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
