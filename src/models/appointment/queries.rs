use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::list_query::QuerySpec;
use super::types::{Appointment, AppointmentStatus, Coordinates, NewAppointment};

const SELECT_APPOINTMENT: &str = "\
    SELECT id, title, \
           COALESCE(description, '') AS description, \
           date, start_time, end_time, \
           COALESCE(location_name, '') AS location_name, \
           COALESCE(location_address, '') AS location_address, \
           latitude, longitude, status \
    FROM appointments";

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: i64,
    title: String,
    description: String,
    date: String,
    start_time: String,
    end_time: String,
    location_name: String,
    location_address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: String,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        // A half-filled pair in storage reads as "no location".
        let coordinates = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        };
        Appointment {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            location_name: row.location_name,
            location_address: row.location_address,
            coordinates,
            // The table's CHECK constraint only admits known values.
            status: AppointmentStatus::parse(&row.status).unwrap_or_default(),
        }
    }
}

/// List appointments matching the planned filter, in the planned order.
pub async fn list(pool: &PgPool, spec: &QuerySpec) -> Result<Vec<Appointment>, AppError> {
    let (where_clause, params) = spec.where_clause(0);
    let sql = format!(
        "{SELECT_APPOINTMENT} WHERE {where_clause} ORDER BY {}",
        spec.order_by()
    );

    let mut query = sqlx::query_as::<_, AppointmentRow>(&sql);
    for p in &params {
        query = query.bind(p);
    }
    let rows = query.fetch_all(pool).await?;

    Ok(rows.into_iter().map(Appointment::from).collect())
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Appointment>, AppError> {
    let sql = format!("{SELECT_APPOINTMENT} WHERE id = $1");
    let row = sqlx::query_as::<_, AppointmentRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Appointment::from))
}

/// Insert a validated appointment. Returns the new id.
pub async fn create(pool: &PgPool, new: &NewAppointment) -> Result<i64, AppError> {
    let (latitude, longitude) = split_coordinates(new.coordinates);
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO appointments \
         (title, description, date, start_time, end_time, location_name, location_address, latitude, longitude, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.date)
    .bind(&new.start_time)
    .bind(&new.end_time)
    .bind(&new.location_name)
    .bind(&new.location_address)
    .bind(latitude)
    .bind(longitude)
    .bind(new.status.as_str())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Overwrite every field of an appointment. Returns the number of rows
/// changed: 0 when the id does not exist.
pub async fn update(pool: &PgPool, id: i64, appt: &NewAppointment) -> Result<u64, AppError> {
    let (latitude, longitude) = split_coordinates(appt.coordinates);
    let result = sqlx::query(
        "UPDATE appointments \
         SET title = $1, description = $2, date = $3, start_time = $4, end_time = $5, \
             location_name = $6, location_address = $7, latitude = $8, longitude = $9, status = $10 \
         WHERE id = $11",
    )
    .bind(&appt.title)
    .bind(&appt.description)
    .bind(&appt.date)
    .bind(&appt.start_time)
    .bind(&appt.end_time)
    .bind(&appt.location_name)
    .bind(&appt.location_address)
    .bind(latitude)
    .bind(longitude)
    .bind(appt.status.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Delete by id. Returns 0 when there was nothing to delete.
pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

fn split_coordinates(coordinates: Option<Coordinates>) -> (Option<f64>, Option<f64>) {
    match coordinates {
        Some(c) => (Some(c.latitude), Some(c.longitude)),
        None => (None, None),
    }
}
