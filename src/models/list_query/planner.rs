// src/models/list_query/planner.rs

use std::cmp::Ordering;

use crate::models::appointment::{Appointment, AppointmentStatus};
use super::{ListViewState, SortKey};

/// What to fetch for a list view: an optional status predicate, an optional
/// case-insensitive title search (both must hold), and an ordering.
///
/// The same semantics are available in memory (`matches`, `compare`) and as
/// SQL (`where_clause`, `order_by`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySpec {
    pub status: Option<AppointmentStatus>,
    pub title_contains: Option<String>,
    pub sort: SortKey,
}

impl QuerySpec {
    pub fn from_state(state: &ListViewState) -> Self {
        QuerySpec {
            status: state.filter.status(),
            title_contains: Some(state.query.clone()).filter(|q| !q.is_empty()),
            sort: state.sort,
        }
    }

    pub fn matches(&self, appt: &Appointment) -> bool {
        let status_ok = self.status.is_none_or(|s| appt.status == s);
        let title_ok = self
            .title_contains
            .as_deref()
            .is_none_or(|q| appt.title.to_lowercase().contains(&q.to_lowercase()));
        status_ok && title_ok
    }

    /// Total order for the chosen sort key; `id` breaks remaining ties.
    pub fn compare(&self, a: &Appointment, b: &Appointment) -> Ordering {
        let by_date = || a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time));
        let primary = match self.sort {
            SortKey::Date => by_date(),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()).then_with(by_date),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    /// Filter and sort an in-memory list the way the database would.
    pub fn apply(&self, mut rows: Vec<Appointment>) -> Vec<Appointment> {
        rows.retain(|a| self.matches(a));
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }

    /// Parameterized WHERE fragment. Placeholders start at `$param_offset + 1`.
    /// Returns `("1=1", [])` when nothing is filtered.
    pub fn where_clause(&self, param_offset: usize) -> (String, Vec<String>) {
        let mut parts: Vec<String> = vec![];
        let mut params: Vec<String> = vec![];

        if let Some(status) = self.status {
            params.push(status.as_str().to_string());
            parts.push(format!("status = ${}", param_offset + params.len()));
        }
        if let Some(q) = &self.title_contains {
            params.push(escape_like(q));
            parts.push(format!(
                "title ILIKE '%' || ${} || '%' ESCAPE '\\'",
                param_offset + params.len()
            ));
        }

        if parts.is_empty() {
            return ("1=1".to_string(), params);
        }
        (parts.join(" AND "), params)
    }

    /// ORDER BY list. Text columns use byte order so SQL and `compare` agree.
    pub fn order_by(&self) -> &'static str {
        match self.sort {
            SortKey::Date => r#"date COLLATE "C" ASC, start_time COLLATE "C" ASC, id ASC"#,
            SortKey::Title => r#"title COLLATE "C" ASC, id ASC"#,
            SortKey::Status => {
                r#"status COLLATE "C" ASC, date COLLATE "C" ASC, start_time COLLATE "C" ASC, id ASC"#
            }
        }
    }
}

/// Make LIKE wildcards in user text literal.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::list_query::plan;

    fn appt(id: i64, title: &str, date: &str, start: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            title: title.into(),
            description: String::new(),
            date: date.into(),
            start_time: start.into(),
            end_time: "23:59".into(),
            location_name: String::new(),
            location_address: String::new(),
            coordinates: None,
            status,
        }
    }

    fn sample() -> Vec<Appointment> {
        use AppointmentStatus::*;
        vec![
            appt(1, "Team Meeting", "2026-02-10", "14:00", Upcoming),
            appt(2, "Doctor Visit", "2026-01-20", "09:00", Past),
            appt(3, "team lunch", "2026-02-10", "12:00", Upcoming),
            appt(4, "Standup", "2026-01-20", "09:00", Upcoming),
            appt(5, "Dentist", "2026-03-01", "08:30", Past),
        ]
    }

    fn ids(rows: &[Appointment]) -> Vec<i64> {
        rows.iter().map(|a| a.id).collect()
    }

    #[test]
    fn default_plan_has_no_predicate_and_date_order() {
        let (spec, _) = plan(None, None, None);
        assert_eq!(spec, QuerySpec::default());
        assert_eq!(spec.where_clause(0), ("1=1".to_string(), vec![]));
        assert_eq!(ids(&spec.apply(sample())), vec![2, 4, 3, 1, 5]);
    }

    #[test]
    fn status_and_search_are_combined() {
        let (spec, _) = plan(Some("Upcoming"), Some("title"), Some("team"));
        assert_eq!(spec.status, Some(AppointmentStatus::Upcoming));
        assert_eq!(spec.title_contains.as_deref(), Some("team"));
        assert_eq!(spec.sort, SortKey::Title);

        let (sql, params) = spec.where_clause(0);
        assert_eq!(sql, "status = $1 AND title ILIKE '%' || $2 || '%' ESCAPE '\\'");
        assert_eq!(params, vec!["Upcoming", "team"]);

        // Case-insensitive; byte order puts "Team Meeting" before "team lunch".
        assert_eq!(ids(&spec.apply(sample())), vec![1, 3]);
    }

    #[test]
    fn status_order_breaks_ties_by_date_then_time() {
        let (spec, _) = plan(None, Some("status"), None);
        assert_eq!(ids(&spec.apply(sample())), vec![2, 5, 4, 3, 1]);
    }

    #[test]
    fn equal_keys_fall_back_to_id() {
        let rows = vec![
            appt(9, "Same", "2026-01-01", "10:00", AppointmentStatus::Upcoming),
            appt(3, "Same", "2026-01-01", "10:00", AppointmentStatus::Upcoming),
        ];
        for sort in SortKey::ALL {
            let spec = QuerySpec { sort, ..Default::default() };
            assert_eq!(ids(&spec.apply(rows.clone())), vec![3, 9]);
        }
    }

    #[test]
    fn past_filter_only() {
        let (spec, _) = plan(Some("Past"), Some("nonsense"), Some(""));
        assert_eq!(spec.title_contains, None);
        assert_eq!(spec.sort, SortKey::Date);
        assert_eq!(spec.where_clause(2), ("status = $3".to_string(), vec!["Past".to_string()]));
        assert_eq!(ids(&spec.apply(sample())), vec![2, 5]);
    }

    #[test]
    fn search_escapes_like_wildcards() {
        let (spec, _) = plan(None, None, Some(r"50%_off\"));
        let (sql, params) = spec.where_clause(0);
        assert_eq!(sql, "title ILIKE '%' || $1 || '%' ESCAPE '\\'");
        assert_eq!(params, vec![r"50\%\_off\\"]);
    }

    #[test]
    fn search_is_a_literal_substring_in_memory() {
        let spec = QuerySpec { title_contains: Some("%".into()), ..Default::default() };
        assert!(spec.apply(sample()).is_empty());
    }

    #[test]
    fn order_by_matches_sort_key() {
        assert!(QuerySpec::default().order_by().starts_with("date"));
        let title = QuerySpec { sort: SortKey::Title, ..Default::default() };
        assert!(title.order_by().starts_with("title"));
        let status = QuerySpec { sort: SortKey::Status, ..Default::default() };
        assert!(status.order_by().starts_with("status"));
        for sort in SortKey::ALL {
            assert!(QuerySpec { sort, ..Default::default() }.order_by().ends_with("id ASC"));
        }
    }
}
