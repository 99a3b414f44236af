use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::triage::priority::{
    DEFAULT_HIGH_PRIORITY_SCORE, DEFAULT_MEDIUM_PRIORITY_SCORE,
};
use crate::workflows::triage::{MatchingConfig, PriorityThresholds, TriageConfig};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the triage service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub triage: TriageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let thresholds = PriorityThresholds {
            high_priority_score: env_number(
                "TRIAGE_HIGH_PRIORITY_SCORE",
                DEFAULT_HIGH_PRIORITY_SCORE,
            )?,
            medium_priority_score: env_number(
                "TRIAGE_MEDIUM_PRIORITY_SCORE",
                DEFAULT_MEDIUM_PRIORITY_SCORE,
            )?,
        };
        if thresholds.medium_priority_score > thresholds.high_priority_score {
            return Err(ConfigError::InvertedThresholds {
                high: thresholds.high_priority_score,
                medium: thresholds.medium_priority_score,
            });
        }

        let score_ceiling = env_number(
            "TRIAGE_MATCH_SCORE_CEILING",
            MatchingConfig::default().score_ceiling,
        )?;
        if score_ceiling == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "TRIAGE_MATCH_SCORE_CEILING",
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            triage: TriageConfig {
                thresholds,
                matching: MatchingConfig { score_ceiling },
            },
        })
    }
}

fn env_number<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str },
    InvertedThresholds { high: u8, medium: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name } => {
                write!(f, "{name} must be a positive whole number")
            }
            ConfigError::InvertedThresholds { high, medium } => write!(
                f,
                "TRIAGE_MEDIUM_PRIORITY_SCORE ({medium}) must not exceed TRIAGE_HIGH_PRIORITY_SCORE ({high})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvertedThresholds { .. } => None,
        }
    }
}
