// src/config.rs

//! Manages hub configuration: loading, defaults, and validation.

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;

/// A raw representation of the config file before validation.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_max_clients")]
    max_clients: usize,
    /// Dispatches slower than this many milliseconds are written to the
    /// slow-query log. Zero or negative disables recording.
    #[serde(default = "default_slow_query_threshold_ms")]
    slow_query_threshold_ms: i64,
    /// Regex patterns for statements the hub refuses to execute.
    #[serde(default)]
    blacklist: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8520
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_clients() -> usize {
    2048
}
fn default_slow_query_threshold_ms() -> i64 {
    0
}

/// The final, validated hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub max_clients: usize,
    pub slow_query_threshold_ms: i64,
    #[serde(default)]
    pub blacklist: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_clients: default_max_clients(),
            slow_query_threshold_ms: default_slow_query_threshold_ms(),
            blacklist: Vec::new(),
        }
    }
}

impl Config {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let raw: RawConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;

        let config = Config {
            host: raw.host,
            port: raw.port,
            log_level: raw.log_level,
            max_clients: raw.max_clients,
            slow_query_threshold_ms: raw.slow_query_threshold_ms,
            blacklist: raw.blacklist,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_clients == 0 {
            return Err(anyhow!("max_clients must be greater than zero"));
        }
        for pattern in &self.blacklist {
            Regex::new(pattern)
                .with_context(|| format!("invalid blacklist pattern '{pattern}'"))?;
        }
        Ok(())
    }
}
