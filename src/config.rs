use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api::ApiConfig;

/// Runtime settings for the `nemesia` binary, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = PathBuf::from(env_string("NEMESIA_DATA_DIR", ".nemesia"));

        let simulate_latency = env_string("NEMESIA_SIMULATE_LATENCY", "true")
            .parse::<bool>()
            .context("NEMESIA_SIMULATE_LATENCY must be true or false")?;

        let latency_scale = env_string("NEMESIA_LATENCY_SCALE", "1.0")
            .parse::<f64>()
            .context("NEMESIA_LATENCY_SCALE must be a number")?;

        let api = ApiConfig::new()
            .simulate_latency(simulate_latency)
            .latency_scale(latency_scale);
        api.validate().context("invalid API configuration")?;

        Ok(Self { data_dir, api })
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
