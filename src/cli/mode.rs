//! Argument-shape classification
//!
//! The raw argument vector is mapped onto exactly one `Mode` before anything
//! runs. Only the filesystem is consulted here (database and list paths), never
//! the network.

use crate::config::AppConfig;
use crate::error::{LocipError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// What a run does
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Print usage and exit cleanly
    Help,
    /// No arguments with a database present: process the default list
    DefaultBatch,
    /// ipinfo.io lookup; an empty target means the caller's own address.
    /// `rejected` holds trailing arguments that make the run fail after the lookup.
    SelfInfo { target: String, rejected: Vec<String> },
    /// AbuseIPDB check of a single address
    Abuse {
        target: String,
        max_age_days: i64,
        raw: bool,
    },
    /// Local database over every line of a file
    GeoBatch(PathBuf),
    /// Local database, full record for one target
    GeoSingle(String),
}

fn is_help(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

/// Classify the arguments that follow the program name
pub fn classify(args: &[String], config: &AppConfig) -> Result<Mode> {
    let Some(first) = args.first() else {
        return Ok(match fs::metadata(&config.database.path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Mode::Help,
            _ => Mode::DefaultBatch,
        });
    };

    match first.as_str() {
        arg if is_help(arg) => Ok(Mode::Help),
        "-i" => Ok(classify_self_info(&args[1..])),
        "-a" => classify_abuse(&args[1..], config),
        _ if args.len() == 1 => Ok(match fs::metadata(first) {
            Ok(meta) if !meta.is_dir() => Mode::GeoBatch(PathBuf::from(first)),
            _ => Mode::GeoSingle(first.clone()),
        }),
        _ => Err(LocipError::rejected("Invalid arguments or combination.")),
    }
}

/// At most one target may follow `-i`, and it must not look like a flag.
/// A single trailing help flag is tolerated; anything else is rejected.
fn classify_self_info(rest: &[String]) -> Mode {
    let (target, trailing) = match rest.split_first() {
        Some((arg, trailing)) if !arg.starts_with('-') => (arg.clone(), trailing),
        _ => (String::new(), rest),
    };

    let rejected = match trailing {
        [] => Vec::new(),
        [only] if is_help(only) => Vec::new(),
        _ => trailing.to_vec(),
    };

    Mode::SelfInfo { target, rejected }
}

/// `-a <ip> [--age N] [--raw]`
fn classify_abuse(rest: &[String], config: &AppConfig) -> Result<Mode> {
    let Some((target, options)) = rest.split_first() else {
        return Err(LocipError::usage("missing IP after -a"));
    };

    let mut max_age_days = config.abuseipdb.max_age_days;
    let mut raw = false;

    let mut i = 0;
    while i < options.len() {
        match options[i].as_str() {
            "--age" if i + 1 < options.len() => {
                let value = &options[i + 1];
                max_age_days = value.parse().map_err(|_| {
                    LocipError::InvalidArgument(format!("invalid value for --age: {}", value))
                })?;
                i += 2;
            }
            "--raw" => {
                raw = true;
                i += 1;
            }
            other => {
                return Err(LocipError::usage(format!("unknown argument: {}", other)));
            }
        }
    }

    Ok(Mode::Abuse {
        target: target.clone(),
        max_age_days,
        raw,
    })
}
