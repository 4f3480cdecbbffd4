//! Path utilities for configuration and credential files
//!
//! Handles XDG directory specifications and path resolution.

use std::env;
use std::path::PathBuf;

/// Get the locip configuration directory
///
/// Priority:
/// 1. LOCIP_CONFIG_HOME environment variable
/// 2. XDG_CONFIG_HOME/locip
/// 3. ~/.config/locip (fallback)
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(path) = env::var("LOCIP_CONFIG_HOME") {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|dir| dir.join("locip"))
}

/// Get the path to the config file
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Candidate AbuseIPDB key files, in lookup order
///
/// `~/.config/abuseipdb/key` first, then `~/.abuseipdb_key`.
pub fn abuseipdb_key_files() -> Vec<PathBuf> {
    match dirs::home_dir() {
        Some(home) => vec![
            home.join(".config").join("abuseipdb").join("key"),
            home.join(".abuseipdb_key"),
        ],
        None => Vec::new(),
    }
}

/// Expand tilde (~) in path
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
