use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::DEFAULT_DATABASE_PATH;
use crate::store::DEFAULT_STORAGE_KEY;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8001/chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub database_path: String,
    pub storage_key: String,
    pub environment: Environment,
    /// Seconds before an outstanding chat request is abandoned. Unset means
    /// wait forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            environment: Environment::default(),
            request_timeout_secs: None,
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

/// Apply `CHAT_ENDPOINT` and `CHAT_ENV` on top of the file config.
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides(
        config,
        std::env::var("CHAT_ENDPOINT").ok(),
        std::env::var("CHAT_ENV").ok(),
    );
}

fn apply_overrides(config: &mut AppConfig, endpoint: Option<String>, environment: Option<String>) {
    if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
        config.endpoint = endpoint;
    }

    if let Some(raw) = environment {
        match Environment::parse(&raw) {
            Some(environment) => config.environment = environment,
            None => log::warn!("Ignoring unknown CHAT_ENV value `{raw}`"),
        }
    }
}
