// src/models/appointment/validate.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::types::{AppointmentInput, AppointmentStatus, Coordinates, FormEcho, NewAppointment};

// ASCII digits only; `\d` would also accept other Unicode digits.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));
static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("time pattern"));

const TITLE_MIN_CHARS: usize = 2;

/// Per-field validation messages. `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// End time not after start time. Only set when both times are well-formed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Exactly one of latitude/longitude was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Names of the populated fields, in declaration order.
    pub fn keys(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("date", &self.date),
            ("start_time", &self.start_time),
            ("end_time", &self.end_time),
            ("time", &self.time),
            ("coords", &self.coords),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
            ("status", &self.status),
        ]
        .into_iter()
        .filter_map(|(key, msg)| msg.as_ref().map(|_| key))
        .collect()
    }

    /// All messages, for a summary box above the form.
    pub fn messages(&self) -> Vec<String> {
        [
            &self.title,
            &self.date,
            &self.start_time,
            &self.end_time,
            &self.time,
            &self.coords,
            &self.latitude,
            &self.longitude,
            &self.status,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

/// Outcome of validating one submission: the error map plus the echo to
/// re-display. The echo is always present, valid or not.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub errors: FormErrors,
    pub form: FormEcho,
    record: Option<NewAppointment>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The validated record, or the errors and echo to send back to the form.
    pub fn into_record(self) -> Result<NewAppointment, (FormErrors, FormEcho)> {
        match self.record {
            Some(record) if self.errors.is_empty() => Ok(record),
            _ => Err((self.errors, self.form)),
        }
    }
}

/// Validate a raw submission. Never fails: every problem becomes an entry in
/// `FormErrors`, and all checks run regardless of earlier failures.
pub fn validate(input: &AppointmentInput) -> Validation {
    let form = FormEcho::normalize(input);
    let mut errors = FormErrors::default();

    if form.title.chars().count() < TITLE_MIN_CHARS {
        errors.title = Some("Title must be at least 2 characters".to_string());
    }

    if !DATE_SHAPE.is_match(&form.date) {
        errors.date = Some("Date must use the format YYYY-MM-DD".to_string());
    }

    let start_ok = TIME_SHAPE.is_match(&form.start_time);
    let end_ok = TIME_SHAPE.is_match(&form.end_time);
    if !start_ok {
        errors.start_time = Some("Start time must use the format HH:MM".to_string());
    }
    if !end_ok {
        errors.end_time = Some("End time must use the format HH:MM".to_string());
    }
    // Zero-padded HH:MM strings sort chronologically.
    if start_ok && end_ok && form.end_time <= form.start_time {
        errors.time = Some("End time must be after start time".to_string());
    }

    let coordinates = parse_coordinates(&form.latitude, &form.longitude, &mut errors);

    let status = AppointmentStatus::parse(&form.status);
    if status.is_none() {
        errors.status = Some("Status must be Upcoming or Past".to_string());
    }

    let record = match (status, errors.is_empty()) {
        (Some(status), true) => Some(NewAppointment {
            title: form.title.clone(),
            description: form.description.clone(),
            date: form.date.clone(),
            start_time: form.start_time.clone(),
            end_time: form.end_time.clone(),
            location_name: form.location_name.clone(),
            location_address: form.location_address.clone(),
            coordinates,
            status,
        }),
        _ => None,
    };

    Validation { errors, form, record }
}

/// Both blank: no coordinates. One blank: `coords`. Otherwise range-check each.
fn parse_coordinates(latitude: &str, longitude: &str, errors: &mut FormErrors) -> Option<Coordinates> {
    match (latitude.is_empty(), longitude.is_empty()) {
        (true, true) => None,
        (false, false) => {
            let lat = in_range(latitude, 90.0);
            let lng = in_range(longitude, 180.0);
            if lat.is_none() {
                errors.latitude = Some("Latitude must be a number between -90 and 90".to_string());
            }
            if lng.is_none() {
                errors.longitude = Some("Longitude must be a number between -180 and 180".to_string());
            }
            Some(Coordinates { latitude: lat?, longitude: lng? })
        }
        _ => {
            errors.coords = Some("Provide both latitude and longitude, or neither".to_string());
            None
        }
    }
}

/// Parse and check `-bound <= value <= bound`. Non-numbers (and NaN) fail.
fn in_range(raw: &str, bound: f64) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| (-bound..=bound).contains(v))
}
