//! Configuration management using environment variables
//!
//! Values are read from the process environment, with a `.env` file loaded
//! first when present. `DATABASE_URL` takes precedence over the individual
//! `DB_*` connection variables.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Direct connection URL (takes precedence over host/port/name/user/password)
    pub url: Option<String>,

    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to keep warm
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: u64,

    /// SSL mode: disable, allow, prefer, require, verify-ca, verify-full
    pub ssl_mode: String,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Build a PostgreSQL connection URL
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        match &self.password {
            Some(password) => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                self.user, password, self.host, self.port, self.name, self.ssl_mode
            ),
            None => format!(
                "postgres://{}@{}:{}/{}?sslmode={}",
                self.user, self.host, self.port, self.name, self.ssl_mode
            ),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Address to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line, for log shippers
    Json,
    /// Human-readable output for local development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(Error::config(format!(
                "Invalid LOG_FORMAT: {} (expected json or pretty)",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_log_format = if cfg!(debug_assertions) {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };

        Ok(Self {
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
                host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(&lookup, "DB_PORT", 5432)?,
                name: lookup("DB_NAME").unwrap_or_else(|| "rocket_api".to_string()),
                user: lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                password: lookup("DB_PASSWORD"),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 2)?,
                acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT", 5)?,
                idle_timeout_secs: parse_or(&lookup, "DB_IDLE_TIMEOUT", 180)?,
                max_lifetime_secs: parse_or(&lookup, "DB_MAX_LIFETIME", 900)?,
                ssl_mode: lookup("DB_SSL_MODE").unwrap_or_else(|| "prefer".to_string()),
                run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            },
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            },
            logging: LoggingConfig {
                format: match lookup("LOG_FORMAT") {
                    Some(value) => value.parse()?,
                    None => default_log_format,
                },
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
