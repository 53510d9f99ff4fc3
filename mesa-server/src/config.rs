use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | MESA_DB_PATH | /var/lib/mesa/mesa.db | SQLite database file |
/// | TIMEZONE | Europe/Madrid | Restaurant business timezone |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | UPCOMING_DAYS_DEFAULT | 7 | Default window for upcoming-reservation listings |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub db_path: String,
    /// Business timezone; "today" and "now" for booking rules are derived
    /// from this, never from UTC day boundaries
    pub timezone: Tz,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Default number of days covered by upcoming-reservation listings
    pub default_upcoming_days: u32,
}

impl Config {
    /// Load configuration from environment variables, using defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("MESA_DB_PATH")
                .unwrap_or_else(|_| "/var/lib/mesa/mesa.db".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::Madrid),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            default_upcoming_days: std::env::var("UPCOMING_DAYS_DEFAULT")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(7),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
