//! Environment variable parsing with warn-level logging for invalid values.

use crate::constants::DEFAULT_PG_PORT;
use crate::error::{Result, TrainerError};

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_with_default(var, std::env::var(var).ok(), default)
}

fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Connection settings for the trainer database.
///
/// Either a full `DATABASE_URL`, or the discrete `DB_HOST`/`DB_PORT`/`DB_NAME`/
/// `DB_USER`/`DB_PASSWORD` variables the deployment guides configure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    Url(String),
    Parts { host: String, port: u16, database: String, user: String, password: String },
}

impl DbConfig {
    /// Read connection settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read connection settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            return Ok(Self::Url(url));
        }

        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| TrainerError::Config(format!("DATABASE_URL or {key} must be set")))
        };

        Ok(Self::Parts {
            host: required("DB_HOST")?,
            port: parse_with_default("DB_PORT", lookup("DB_PORT"), DEFAULT_PG_PORT),
            database: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
        })
    }
}
