use serde::Serialize;

use crate::models::appointment::{Appointment, FormErrors};
use crate::models::list_query::{ListViewState, NavigationLinks};

/// `GET /api/v1/appointments` body: the rows plus the normalized view and
/// its navigation links, so clients can page through filters the same way
/// the HTML list does.
#[derive(Serialize, Debug)]
pub struct ApiListResponse {
    pub items: Vec<Appointment>,
    pub total: usize,
    pub view: ListViewState,
    pub links: NavigationLinks,
}

/// API error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FormErrors>,
}

impl ApiErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        ApiErrorResponse { error: error.into(), errors: None }
    }

    pub fn validation(errors: FormErrors) -> Self {
        ApiErrorResponse { error: "Validation failed".to_string(), errors: Some(errors) }
    }
}
