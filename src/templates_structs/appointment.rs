use askama::Template;

use crate::models::appointment::{Appointment, FormEcho, FormErrors};
use crate::models::list_query::{ListViewState, NavigationLinks};
use super::PageContext;

/// One row of the appointment list, with a link that keeps the view state.
pub struct AppointmentListItem {
    pub appointment: Appointment,
    pub url: String,
    pub is_selected: bool,
}

impl AppointmentListItem {
    pub fn build_all(rows: Vec<Appointment>, view: &ListViewState, selected_id: Option<i64>) -> Vec<Self> {
        rows.into_iter()
            .map(|appointment| AppointmentListItem {
                url: view.record_url(appointment.id),
                is_selected: Some(appointment.id) == selected_id,
                appointment,
            })
            .collect()
    }
}

/// List + detail + create form, all on one page.
#[derive(Template)]
#[template(path = "appointments/index.html")]
pub struct AppointmentIndexTemplate {
    pub ctx: PageContext,
    pub appointments: Vec<AppointmentListItem>,
    pub selected: Option<Appointment>,
    pub view: ListViewState,
    pub links: NavigationLinks,
    pub form: FormEcho,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "appointments/edit.html")]
pub struct AppointmentEditTemplate {
    pub ctx: PageContext,
    pub appointment_id: i64,
    pub form_action: String,
    pub form: FormEcho,
    pub errors: FormErrors,
}
