use serde::Serialize;

use super::{ListViewState, SortKey, StatusFilter};

/// The six filter/sort switches shown above the list. Each one changes a
/// single dimension and keeps the other one, plus the search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLinks {
    pub filter_all_url: String,
    pub filter_upcoming_url: String,
    pub filter_past_url: String,
    pub sort_date_url: String,
    pub sort_title_url: String,
    pub sort_status_url: String,
}

impl NavigationLinks {
    pub fn build(state: &ListViewState) -> Self {
        let filter = |f: StatusFilter| state.with_filter(f).list_url();
        let sort = |s: SortKey| state.with_sort(s).list_url();
        NavigationLinks {
            filter_all_url: filter(StatusFilter::All),
            filter_upcoming_url: filter(StatusFilter::Upcoming),
            filter_past_url: filter(StatusFilter::Past),
            sort_date_url: sort(SortKey::Date),
            sort_title_url: sort(SortKey::Title),
            sort_status_url: sort(SortKey::Status),
        }
    }
}
