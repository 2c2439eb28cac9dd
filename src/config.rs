//! Runtime configuration from environment variables (and an optional `.env`).

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/planner";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_APP_NAME: &str = "Simple Appointment Planner";
const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Cookie keys shorter than this are rejected in favour of a random key.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// `None` when unset or too short; a random key is generated instead.
    pub session_key: Option<Vec<u8>>,
    pub app_name: String,
    pub seed_demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            session_key: None,
            app_name: DEFAULT_APP_NAME.into(),
            seed_demo: true,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::info!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparseable values keep their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = AppConfig::default();

        if let Some(v) = get("DATABASE_URL") {
            cfg.database_url = v;
        }
        if let Some(v) = get("BIND_ADDR") {
            cfg.bind_addr = v;
        }
        if let Some(v) = get("DB_MAX_CONNECTIONS") {
            match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => cfg.max_connections = n,
                _ => log::warn!("Ignoring DB_MAX_CONNECTIONS={v:?}, using {}", cfg.max_connections),
            }
        }
        match get("SESSION_KEY") {
            Some(v) if v.len() >= MIN_SESSION_KEY_LEN => cfg.session_key = Some(v.into_bytes()),
            Some(v) => log::warn!(
                "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                v.len()
            ),
            None => log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)"),
        }
        if let Some(v) = get("APP_NAME").filter(|v| !v.trim().is_empty()) {
            cfg.app_name = v;
        }
        if let Some(v) = get("SEED_DEMO") {
            cfg.seed_demo = !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off");
        }

        cfg
    }
}
