use serde::Deserialize;
use std::env;

/// 512 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 512 * 1024 * 1024;

pub const DEFAULT_EMBEDDING_DIMENSIONS: u32 = 1536;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub documents: DocumentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Populate sample data when the store is initialized.
    pub seed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    pub max_upload_size: usize,
    pub embedding_dimensions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {s}")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("CYNCITY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CYNCITY_PORT", 3000),
                log_format: parse_env_or("LOG_FORMAT", LogFormat::Pretty),
            },
            store: StoreConfig {
                seed: parse_env_or("CYNCITY_SEED", true),
            },
            documents: DocumentsConfig {
                max_upload_size: parse_env_or("MAX_UPLOAD_SIZE", DEFAULT_MAX_UPLOAD_SIZE),
                embedding_dimensions: parse_env_or(
                    "EMBEDDING_DIMENSIONS",
                    DEFAULT_EMBEDDING_DIMENSIONS,
                ),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
