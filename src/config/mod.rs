//! Configuration module for locip
//!
//! Handles loading the optional YAML config file and environment variable overrides.
//! The config file is only read, never created.

use crate::utils::path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ipinfo: IpInfoConfig,
    #[serde(default)]
    pub abuseipdb: AbuseIpDbConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Local GeoLite2 database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// GeoLite2-City database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// Input list processed when no arguments are given
    #[serde(default = "default_input_file")]
    pub default_input: PathBuf,
}

/// ipinfo.io configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpInfoConfig {
    /// Base URL; the target segment and `json` are appended
    #[serde(default = "default_ipinfo_url")]
    pub base_url: String,
}

/// AbuseIPDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbuseIpDbConfig {
    /// Check endpoint
    #[serde(default = "default_abuseipdb_url")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default value for `--age`
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,

    /// Environment variable holding the API key
    #[serde(default = "default_key_env")]
    pub key_env: String,

    /// Key files tried in order when the environment variable is empty
    #[serde(default = "path::abuseipdb_key_files")]
    pub key_files: Vec<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub enable_colors: bool,
}

// Default value functions
fn default_database_path() -> PathBuf {
    PathBuf::from("/opt/4rji/GeoLite2-City.mmdb")
}

fn default_input_file() -> PathBuf {
    PathBuf::from("ips.txt")
}

fn default_ipinfo_url() -> String {
    "https://ipinfo.io/".to_string()
}

fn default_abuseipdb_url() -> String {
    "https://api.abuseipdb.com/api/v2/check".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_age_days() -> i64 {
    90
}

fn default_key_env() -> String {
    "ABUSEIPDB_KEY".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            default_input: default_input_file(),
        }
    }
}

impl Default for IpInfoConfig {
    fn default() -> Self {
        Self {
            base_url: default_ipinfo_url(),
        }
    }
}

impl Default for AbuseIpDbConfig {
    fn default() -> Self {
        Self {
            endpoint: default_abuseipdb_url(),
            timeout_secs: default_timeout_secs(),
            max_age_days: default_max_age_days(),
            key_env: default_key_env(),
            key_files: path::abuseipdb_key_files(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enable_colors: default_true(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match path::config_file() {
            Some(file) if file.exists() => Self::from_file(&file)?,
            _ => Self::default(),
        };

        // Override with environment variables
        config.apply_env();

        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(file: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read config file {}", file.display()))?;

        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", file.display()))?;

        let database = path::expand_tilde(&config.database.path.to_string_lossy());
        config.database.path = database;
        config.abuseipdb.key_files = config
            .abuseipdb
            .key_files
            .iter()
            .map(|p| path::expand_tilde(&p.to_string_lossy()))
            .collect();

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env(&mut self) {
        if let Ok(val) = env::var("LOCIP_DB") {
            if !val.is_empty() {
                self.database.path = path::expand_tilde(&val);
            }
        }
        if env::var_os("LOCIP_NO_COLOR").is_some() {
            self.output.enable_colors = false;
        }
    }
}
