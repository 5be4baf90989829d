use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::diagnosis::{DiagnosisOptions, DEFAULT_MAX_SYMPTOMS};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub diagnosis: DiagnosisConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            diagnosis: DiagnosisConfig::from_env()?,
        })
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

/// Diagnosis limits and where the catalog export lives.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisConfig {
    pub max_symptoms: usize,
    pub top_n: Option<usize>,
    /// JSON catalog export; the built-in standard catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
}

impl DiagnosisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_symptoms = match env::var("DIAGNOSIS_MAX_SYMPTOMS") {
            Ok(raw) => parse_positive(&raw).ok_or(ConfigError::InvalidMaxSymptoms)?,
            Err(_) => DEFAULT_MAX_SYMPTOMS,
        };

        let top_n = match env::var("DIAGNOSIS_TOP_N") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(parse_positive(&raw).ok_or(ConfigError::InvalidTopN)?),
            Err(_) => None,
        };

        let catalog_path = env::var("DIAGNOSIS_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            max_symptoms,
            top_n,
            catalog_path,
        })
    }

    pub fn options(&self) -> DiagnosisOptions {
        DiagnosisOptions {
            max_symptoms: self.max_symptoms,
            top_n: self.top_n,
        }
    }
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|value| *value > 0)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMaxSymptoms,
    InvalidTopN,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMaxSymptoms => {
                write!(f, "DIAGNOSIS_MAX_SYMPTOMS must be a positive integer")
            }
            ConfigError::InvalidTopN => write!(f, "DIAGNOSIS_TOP_N must be a positive integer"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMaxSymptoms
            | ConfigError::InvalidTopN => None,
        }
    }
}
