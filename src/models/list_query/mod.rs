//! List-view state: which appointments to show and in what order.
//!
//! Query-string values are untrusted and never rejected. `StatusFilter::parse`
//! and `SortKey::parse` are the only places that decide what an input means;
//! anything they do not recognize becomes the default.

use serde::{Deserialize, Serialize};

use crate::models::appointment::AppointmentStatus;

pub mod links;
pub mod planner;

pub use links::NavigationLinks;
pub use planner::QuerySpec;

/// Path of the list page; navigation links point here.
pub const LIST_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Past,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Upcoming, StatusFilter::Past];

    /// `Upcoming` and `Past` (exact match) select a status; anything else,
    /// including a missing value, means no status predicate.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.and_then(AppointmentStatus::parse) {
            Some(AppointmentStatus::Upcoming) => StatusFilter::Upcoming,
            Some(AppointmentStatus::Past) => StatusFilter::Past,
            None => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Upcoming => "Upcoming",
            StatusFilter::Past => "Past",
        }
    }

    pub fn status(&self) -> Option<AppointmentStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Upcoming => Some(AppointmentStatus::Upcoming),
            StatusFilter::Past => Some(AppointmentStatus::Past),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Title,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Title, SortKey::Status];

    /// `title` and `status` (exact match) pick those orderings; anything else
    /// falls back to date order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => SortKey::Title,
            Some("status") => SortKey::Status,
            _ => SortKey::Date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Status => "status",
        }
    }
}

/// Raw `?filter=&sort=&q=` parameters as they arrive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub q: Option<String>,
}

/// Normalized view state. Built per request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListViewState {
    pub filter: StatusFilter,
    pub sort: SortKey,
    /// Trimmed search text; empty means no search.
    pub query: String,
}

impl ListViewState {
    pub fn from_params(filter: Option<&str>, sort: Option<&str>, query: Option<&str>) -> Self {
        ListViewState {
            filter: StatusFilter::parse(filter),
            sort: SortKey::parse(sort),
            query: query.map(str::trim).unwrap_or("").to_string(),
        }
    }

    pub fn with_filter(&self, filter: StatusFilter) -> Self {
        ListViewState { filter, ..self.clone() }
    }

    pub fn with_sort(&self, sort: SortKey) -> Self {
        ListViewState { sort, ..self.clone() }
    }

    /// `filter=..&sort=..` plus `&q=..` when searching, URL-encoded.
    pub fn query_string(&self) -> String {
        let mut pairs = vec![("filter", self.filter.as_str()), ("sort", self.sort.as_str())];
        if !self.query.is_empty() {
            pairs.push(("q", self.query.as_str()));
        }
        serde_urlencoded::to_string(&pairs).unwrap_or_default()
    }

    /// Link to the list page in this state.
    pub fn list_url(&self) -> String {
        format!("{LIST_PATH}?{}", self.query_string())
    }

    /// Link to one appointment that keeps the current view.
    pub fn record_url(&self, id: i64) -> String {
        format!("/appointments/{id}?{}", self.query_string())
    }
}

impl From<&ListParams> for ListViewState {
    fn from(params: &ListParams) -> Self {
        ListViewState::from_params(params.filter.as_deref(), params.sort.as_deref(), params.q.as_deref())
    }
}

/// Everything a list page needs from the view parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPlan {
    pub state: ListViewState,
    pub spec: QuerySpec,
    pub links: NavigationLinks,
}

impl ListPlan {
    pub fn new(filter: Option<&str>, sort: Option<&str>, query: Option<&str>) -> Self {
        Self::from_state(ListViewState::from_params(filter, sort, query))
    }

    pub fn from_state(state: ListViewState) -> Self {
        let spec = QuerySpec::from_state(&state);
        let links = NavigationLinks::build(&state);
        ListPlan { state, spec, links }
    }
}

impl From<&ListParams> for ListPlan {
    fn from(params: &ListParams) -> Self {
        ListPlan::from_state(ListViewState::from(params))
    }
}

/// Turn raw view parameters into a query and the navigation links for the page.
pub fn plan(filter: Option<&str>, sort: Option<&str>, query: Option<&str>) -> (QuerySpec, NavigationLinks) {
    let ListPlan { spec, links, .. } = ListPlan::new(filter, sort, query);
    (spec, links)
}
