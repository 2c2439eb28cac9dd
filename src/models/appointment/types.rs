use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle status of an appointment. Stored and displayed as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Upcoming,
    Past,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 2] = [AppointmentStatus::Upcoming, AppointmentStatus::Past];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Past => "Past",
        }
    }

    /// Exact, case-sensitive match on the variant name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Upcoming" => Some(AppointmentStatus::Upcoming),
            "Past" => Some(AppointmentStatus::Past),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A latitude/longitude pair. Either both are known or the appointment has none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A stored appointment as returned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location_name: String,
    pub location_address: String,
    #[serde(flatten)]
    pub coordinates: Option<Coordinates>,
    pub status: AppointmentStatus,
}

/// A validated appointment, ready for insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location_name: String,
    pub location_address: String,
    pub coordinates: Option<Coordinates>,
    pub status: AppointmentStatus,
}

/// Untrusted form data from the create/edit forms (and the JSON API).
///
/// Every field is optional on the wire; a missing field deserializes to its
/// empty value so the validator can report it instead of the extractor
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppointmentInput {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub latitude: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub longitude: Option<String>,
    pub status: Option<String>,
    /// Only checked by the HTML handlers; never part of the record.
    pub csrf_token: String,
}

/// Accept coordinates as strings (forms) or numbers (JSON).
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|v| match v {
        Loose::Text(s) => s,
        Loose::Number(n) => n.to_string(),
    }))
}

/// The form as it should be re-displayed: trimmed strings, status defaulted,
/// plus two flags for selecting the status option in templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormEcho {
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location_name: String,
    pub location_address: String,
    pub latitude: String,
    pub longitude: String,
    pub status: String,
    pub is_upcoming: bool,
    pub is_past: bool,
}

impl FormEcho {
    /// Empty create form.
    pub fn blank() -> Self {
        Self::normalize(&AppointmentInput::default())
    }

    /// Trim every field and default a blank status to `Upcoming`.
    pub fn normalize(input: &AppointmentInput) -> Self {
        let trimmed = |s: &str| s.trim().to_string();
        let optional = |s: &Option<String>| s.as_deref().map(str::trim).unwrap_or("").to_string();

        let status = match input.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => AppointmentStatus::default().as_str().to_string(),
        };

        FormEcho {
            title: trimmed(&input.title),
            description: optional(&input.description),
            date: trimmed(&input.date),
            start_time: trimmed(&input.start_time),
            end_time: trimmed(&input.end_time),
            location_name: optional(&input.location_name),
            location_address: optional(&input.location_address),
            latitude: optional(&input.latitude),
            longitude: optional(&input.longitude),
            is_upcoming: status == AppointmentStatus::Upcoming.as_str(),
            is_past: status == AppointmentStatus::Past.as_str(),
            status,
        }
    }

    /// Pre-fill the edit form from a stored record.
    pub fn from_record(record: &Appointment) -> Self {
        let (latitude, longitude) = match record.coordinates {
            Some(c) => (c.latitude.to_string(), c.longitude.to_string()),
            None => (String::new(), String::new()),
        };
        FormEcho {
            title: record.title.clone(),
            description: record.description.clone(),
            date: record.date.clone(),
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            location_name: record.location_name.clone(),
            location_address: record.location_address.clone(),
            latitude,
            longitude,
            status: record.status.as_str().to_string(),
            is_upcoming: record.status == AppointmentStatus::Upcoming,
            is_past: record.status == AppointmentStatus::Past,
        }
    }

    /// Turn the echo back into raw input, e.g. to re-validate it.
    pub fn to_input(&self) -> AppointmentInput {
        let optional = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
        AppointmentInput {
            title: self.title.clone(),
            description: optional(&self.description),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            location_name: optional(&self.location_name),
            location_address: optional(&self.location_address),
            latitude: optional(&self.latitude),
            longitude: optional(&self.longitude),
            status: Some(self.status.clone()),
            csrf_token: String::new(),
        }
    }
}
