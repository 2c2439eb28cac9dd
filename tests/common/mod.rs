//! Shared test infrastructure.
//!
//! Database-backed tests need a Postgres server named by `TEST_DATABASE_URL`.
//! Each test gets its own schema with migrations applied; when the variable
//! is unset `setup_test_db()` returns `None` and the test returns early.

#![allow(dead_code, unused_macros)]

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use planner::config::AppConfig;
use planner::db::MIGRATOR;
use planner::models::appointment::{AppointmentStatus, Coordinates, NewAppointment};

pub const SESSION_COOKIE: &str = "id";

pub struct TestDb {
    pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drop the schema. Tests that panic leave it behind.
    pub async fn teardown(self) {
        self.pool.close().await;
        let drop = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
        if let Err(e) = sqlx::query(&drop).execute(&self.admin).await {
            eprintln!("failed to drop test schema {}: {e}", self.schema);
        }
        self.admin.close().await;
    }
}

/// Fresh schema with migrations applied, or `None` without a test database.
pub async fn setup_test_db() -> Option<TestDb> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");

    let suffix: u64 = rand::random();
    let schema = format!("planner_test_{suffix:016x}");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let sql = search_path.clone();
            Box::pin(async move {
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("Failed to open test pool");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");

    Some(TestDb { pool, admin, schema })
}

/// Pool that never connects; for handlers that fail before touching storage.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/planner_unused")
        .expect("lazy pool")
}

pub fn test_config() -> AppConfig {
    AppConfig { seed_demo: false, ..AppConfig::default() }
}

pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build()
}

/// Build the full application around `pool`. Needs `#[macro_use] mod common;`.
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(common::session_middleware())
                .app_data(actix_web::web::Data::new($pool))
                .app_data(actix_web::web::Data::new(common::test_config()))
                .configure(planner::handlers::configure)
                .default_service(actix_web::web::to(planner::handlers::not_found)),
        )
        .await
    };
}

/// The session cookie a response set, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

/// Pull the CSRF token out of a rendered page.
pub fn csrf_token(html: &str) -> Option<String> {
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).ok()?;
    re.captures(html).map(|c| c[1].to_string())
}

pub fn sample(title: &str, date: &str, start_time: &str, status: AppointmentStatus) -> NewAppointment {
    NewAppointment {
        title: title.to_string(),
        description: String::new(),
        date: date.to_string(),
        start_time: start_time.to_string(),
        end_time: "23:00".to_string(),
        location_name: String::new(),
        location_address: String::new(),
        coordinates: None,
        status,
    }
}

pub fn with_location(mut appt: NewAppointment, latitude: f64, longitude: f64) -> NewAppointment {
    appt.location_name = "Campus".to_string();
    appt.location_address = "1280 Main St".to_string();
    appt.coordinates = Some(Coordinates { latitude, longitude });
    appt
}

pub fn form_body(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).expect("encode form")
}
