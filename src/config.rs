use serde::{Deserialize, Serialize};

use crate::models::ModelType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Backend
    pub backend_url: String,
    pub api_token: String,
    pub request_timeout_secs: u64,

    // Upload gating (checked before the parser ever runs)
    pub max_upload_bytes: usize,

    // Analysis
    pub default_model: ModelType,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            backend_url: env("BACKEND_URL", "http://localhost:8200"),
            api_token: env("API_TOKEN", ""),
            request_timeout_secs: env("REQUEST_TIMEOUT", "30").parse().unwrap_or(30),
            max_upload_bytes: 1024 * 1024, // 1 MiB upload ceiling
            default_model: ModelType::from_str_loose(&env("DEFAULT_MODEL", "balanced"))
                .unwrap_or(ModelType::Balanced),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }
}
