//! AbuseIPDB credential lookup
//!
//! The key comes from an environment variable, or failing that from the first
//! readable key file. Nothing is cached: every call checks again.

use crate::config::AbuseIpDbConfig;
use crate::error::{LocipError, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Where to look for the API key
#[derive(Debug, Clone)]
pub struct CredentialSource {
    env_var: String,
    files: Vec<PathBuf>,
}

impl CredentialSource {
    pub fn new(env_var: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            env_var: env_var.into(),
            files,
        }
    }

    pub fn from_config(config: &AbuseIpDbConfig) -> Self {
        Self::new(config.key_env.clone(), config.key_files.clone())
    }

    /// Resolve the key
    ///
    /// A non-empty environment variable wins. Otherwise the contents of the first
    /// readable file are returned with trailing `\n`, `\r` and spaces removed.
    pub fn resolve(&self) -> Result<String> {
        if let Ok(value) = env::var(&self.env_var) {
            if !value.is_empty() {
                log::debug!("Using AbuseIPDB key from ${}", self.env_var);
                return Ok(value);
            }
        }

        for file in &self.files {
            match fs::read(file) {
                Ok(bytes) => {
                    log::debug!("Using AbuseIPDB key from {}", file.display());
                    let text = String::from_utf8_lossy(&bytes);
                    return Ok(trim_key(&text).to_string());
                }
                Err(e) => log::debug!("Key file {} unavailable: {}", file.display(), e),
            }
        }

        Err(LocipError::MissingCredential(self.env_var.clone()))
    }
}

/// Strip trailing newline, carriage return and space characters only
fn trim_key(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r', ' '])
}
