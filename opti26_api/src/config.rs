use std::{path::PathBuf, time::Duration};

use opti26_matrix_providers::{
    fallback_policy::FallbackPolicy,
    travel_matrix_client::{DEFAULT_ROUTING_TIMEOUT, DEFAULT_ROUTING_URL, TravelMatrixClientConfig},
};
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_OPTIMIZER: &str = "./velora.exe";
pub const DEFAULT_RESULTS_DIR: &str = "./results";
pub const DEFAULT_STORE_FILE: &str = "optimization_results.jsonl";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error)]
#[error("Invalid value '{value}' for {variable}: {reason}")]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind: String,
    pub routing: TravelMatrixClientConfig,
    pub optimizer: PathBuf,
    /// Where the optimizer input and output JSON files are written
    pub results_dir: PathBuf,
    pub store_path: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let results_dir = PathBuf::from(DEFAULT_RESULTS_DIR);
        Self {
            bind: DEFAULT_BIND.to_owned(),
            routing: TravelMatrixClientConfig::default(),
            optimizer: PathBuf::from(DEFAULT_OPTIMIZER),
            store_path: results_dir.join(DEFAULT_STORE_FILE),
            results_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Reads the configuration through `lookup`, unset variables keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let results_dir = lookup("OPTI26_RESULTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));

        let timeout = match lookup("OPTI26_ROUTING_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse("OPTI26_ROUTING_TIMEOUT_SECS", value)?),
            None => DEFAULT_ROUTING_TIMEOUT,
        };

        let fallback_policy = match lookup("OPTI26_FALLBACK_POLICY") {
            Some(value) => parse("OPTI26_FALLBACK_POLICY", value)?,
            None => FallbackPolicy::default(),
        };

        let max_upload_bytes = match lookup("OPTI26_MAX_UPLOAD_BYTES") {
            Some(value) => parse("OPTI26_MAX_UPLOAD_BYTES", value)?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(ApiConfig {
            bind: lookup("OPTI26_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned()),
            routing: TravelMatrixClientConfig {
                service_url: lookup("OPTI26_ROUTING_URL")
                    .unwrap_or_else(|| DEFAULT_ROUTING_URL.to_owned()),
                timeout,
                fallback_policy,
            },
            optimizer: lookup("OPTI26_OPTIMIZER")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OPTIMIZER)),
            store_path: lookup("OPTI26_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| results_dir.join(DEFAULT_STORE_FILE)),
            results_dir,
            max_upload_bytes,
        })
    }
}

fn parse<T>(variable: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError {
        variable,
        reason: err.to_string(),
        value,
    })
}
