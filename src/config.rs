use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::{DEFAULT_RAMP_HIGH, DEFAULT_RAMP_LOW, DEFAULT_RAMP_STOPS};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub cors_origin: String,
    pub evaluator: EvaluatorConfig,
    pub ramp: RampConfig,
}

#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub enabled: bool,
    pub mock: bool,
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct RampConfig {
    pub stops: usize,
    pub low: String,
    pub high: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            evaluator: EvaluatorConfig {
                enabled: env_or_bool("EVALUATOR_ENABLED", true),
                mock: env_or_bool("EVALUATOR_MOCK", true),
                api_url: env_or("EVALUATOR_API_URL", ""),
                timeout_secs: env_or_parse("EVALUATOR_TIMEOUT_SECS", 30_u64),
            },
            ramp: RampConfig {
                stops: env_or_parse("RAMP_STOPS", DEFAULT_RAMP_STOPS),
                low: env_or("RAMP_COLOR_LOW", DEFAULT_RAMP_LOW),
                high: env_or("RAMP_COLOR_HIGH", DEFAULT_RAMP_HIGH),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
