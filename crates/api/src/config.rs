//! # API Configuration Module
//!
//! Loads the server and workflow settings from environment variables.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `LEAVE_ALLOTMENT_CASUAL`, `LEAVE_ALLOTMENT_SICK`, `LEAVE_ALLOTMENT_VACATION`,
//!   `LEAVE_ALLOTMENT_MEDICAL`: Days granted when a fiscal-year ledger is opened
//!   (defaults: 12, 10, 15, 10)
//! - `DAILY_WORK_HOURS`: Hours that count as a full working day (default: 8)

use eyre::{Result, WrapErr};
use leavedesk_core::policy::{LeaveAllotments, LeavePolicy};
use std::{env, str::FromStr};
use tracing::Level;

/// Configuration for the leavedesk API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use leavedesk_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Leave allotments and working-day length handed to the workflows
    pub policy: LeavePolicy,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - A leave allotment or DAILY_WORK_HOURS is set but not a valid number
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            policy: policy_from_env()?,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reads the workflow policy, falling back to the defaults for unset values.
pub fn policy_from_env() -> Result<LeavePolicy> {
    let defaults = LeavePolicy::default();

    let allotments = LeaveAllotments {
        casual: env_or("LEAVE_ALLOTMENT_CASUAL", defaults.allotments.casual)?,
        sick: env_or("LEAVE_ALLOTMENT_SICK", defaults.allotments.sick)?,
        vacation: env_or("LEAVE_ALLOTMENT_VACATION", defaults.allotments.vacation)?,
        medical: env_or("LEAVE_ALLOTMENT_MEDICAL", defaults.allotments.medical)?,
    };
    let daily_work_hours: f64 = env_or("DAILY_WORK_HOURS", defaults.daily_work_hours)?;
    if daily_work_hours <= 0.0 {
        eyre::bail!("DAILY_WORK_HOURS must be positive, got {daily_work_hours}");
    }

    Ok(LeavePolicy {
        allotments,
        daily_work_hours,
    })
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {key} value: {value}")),
        Err(_) => Ok(default),
    }
}

pub fn parse_log_level(value: &str) -> Level {
    match value.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
