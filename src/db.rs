use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::appointment::{self, AppointmentStatus, Coordinates, NewAppointment};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn init_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// The two sample appointments a fresh install starts with.
pub fn demo_appointments() -> Vec<NewAppointment> {
    vec![
        NewAppointment {
            title: "Team Meeting".into(),
            description: "Weekly sync".into(),
            date: "2026-02-10".into(),
            start_time: "14:00".into(),
            end_time: "15:00".into(),
            location_name: "Campus".into(),
            location_address: "1280 Main St".into(),
            coordinates: Some(Coordinates { latitude: 43.2609, longitude: -79.9192 }),
            status: AppointmentStatus::Upcoming,
        },
        NewAppointment {
            title: "Doctor Visit".into(),
            description: "Checkup".into(),
            date: "2026-01-20".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            location_name: "Clinic".into(),
            location_address: "55 King St".into(),
            coordinates: Some(Coordinates { latitude: 43.2557, longitude: -79.8711 }),
            status: AppointmentStatus::Past,
        },
    ]
}

/// Insert the demo appointments if the table is empty. Returns how many were added.
pub async fn seed_demo(pool: &PgPool) -> Result<usize, AppError> {
    let existing = appointment::count(pool).await?;
    if existing > 0 {
        log::info!("Database already has {existing} appointments, skipping demo seed");
        return Ok(0);
    }

    let demo = demo_appointments();
    for appt in &demo {
        appointment::create(pool, appt).await?;
    }
    log::info!("Seeded {} demo appointments", demo.len());
    Ok(demo.len())
}
