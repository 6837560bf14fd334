use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::mission::{
    coerce_weight, Category, MissionSettings, ResourceLimits, Variability, Weights,
};

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
    pub mission: MissionConfig,
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
            mission: MissionConfig::from_env()?,
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

/// Instructor defaults for new sessions.
///
/// `DAUNTLESS_WEIGHT_<CATEGORY>` overrides one weight; an unset variable keeps
/// the standard weight while an unparseable one counts as 0, matching what the
/// instructor panel does with a bad field.
#[derive(Debug, Clone)]
pub struct MissionConfig {
    pub catalog_path: Option<PathBuf>,
    pub weights: Weights,
    pub variability: Variability,
    pub debug_analysis: bool,
}

impl MissionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let catalog_path = env::var("DAUNTLESS_CATALOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let mut weights = Weights::standard();
        for category in Category::ordered() {
            if let Ok(raw) = env::var(weight_var(category)) {
                weights.set(category, coerce_weight(Some(&raw)));
            }
        }

        let variability = match env::var("DAUNTLESS_VARIABILITY") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(Variability::from_level)
                .ok_or(ConfigError::InvalidVariability { value: raw })?,
            Err(_) => Variability::Off,
        };

        let debug_analysis = env::var("DAUNTLESS_DEBUG_ANALYSIS")
            .map(|raw| {
                matches!(
                    raw.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(false);

        Ok(Self {
            catalog_path,
            weights,
            variability,
            debug_analysis,
        })
    }

    pub fn settings(&self) -> MissionSettings {
        MissionSettings {
            weights: self.weights.clone(),
            variability: self.variability,
            limits: ResourceLimits::STANDARD,
            debug_analysis: self.debug_analysis,
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            weights: Weights::standard(),
            variability: Variability::Off,
            debug_analysis: false,
        }
    }
}

fn weight_var(category: Category) -> String {
    format!("DAUNTLESS_WEIGHT_{}", category.key().to_ascii_uppercase())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidVariability { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidVariability { value } => write!(
                f,
                "DAUNTLESS_VARIABILITY must be 0, 1, or 2 (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidVariability { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
