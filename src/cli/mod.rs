//! CLI module for locip
//!
//! The argument vector is classified by hand (see `mode`) and then dispatched to
//! exactly one backend, or to the batch processor driving one.

pub mod mode;

use crate::backend::{AbuseIpDbClient, GeoIP2Database, IpInfoClient, Resolver};
use crate::batch::Batch;
use crate::config::AppConfig;
use crate::credential::CredentialSource;
use crate::error::{LocipError, Result};
use crate::output::{formatter, write_usage};
use clap::Parser;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

pub use mode::Mode;

#[derive(Parser, Debug)]
#[command(name = "locip")]
#[command(version, about = "Look up IP geolocation from a local GeoLite2 database, ipinfo.io, or AbuseIPDB")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Raw arguments; their shape decides what runs (see `locip -h`)
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub async fn run(&self, mut config: AppConfig) -> Result<()> {
        if !atty::is(atty::Stream::Stdout) {
            config.output.enable_colors = false;
        }

        let mut stdout = io::stdout().lock();
        warn_missing_database(&self.args, &config, &mut stdout)?;

        let mode = mode::classify(&self.args, &config)?;
        log::debug!("Mode: {:?}", mode);

        execute(mode, &config, &mut stdout).await
    }
}

/// With arguments given, a missing database is announced up front; a bare
/// invocation stays quiet and falls back to usage instead.
fn warn_missing_database<W: Write>(args: &[String], config: &AppConfig, out: &mut W) -> Result<()> {
    if args.is_empty() {
        return Ok(());
    }

    if let Err(e) = fs::metadata(&config.database.path) {
        if e.kind() == ErrorKind::NotFound {
            writeln!(
                out,
                "Warning: GeoLite2 database not found at {}. Local lookup features will be unavailable.",
                config.database.path.display()
            )?;
        }
    }
    Ok(())
}

/// Report a failed run
///
/// Rejected argument combinations are printed on `out`; every other failure
/// becomes an `ERR:` line on `err_out`. Usage text follows on `out` when the
/// error calls for it.
pub fn report_failure<O: Write, E: Write>(
    error: &LocipError,
    out: &mut O,
    err_out: &mut E,
) -> io::Result<()> {
    if error.is_rejection() {
        writeln!(out, "{}", error)?;
    } else {
        writeln!(err_out, "ERR: {}", error)?;
    }
    if error.shows_usage() {
        write_usage(out)?;
    }
    Ok(())
}

/// Run one classified mode, writing user-facing output to `out`
pub async fn execute<W: Write>(mode: Mode, config: &AppConfig, out: &mut W) -> Result<()> {
    match mode {
        Mode::Help => {
            write_usage(out)?;
            Ok(())
        }
        Mode::DefaultBatch => geo_batch(&config.database.default_input, true, config, out).await,
        Mode::GeoBatch(path) => geo_batch(&path, false, config, out).await,
        Mode::GeoSingle(target) => geo_single(&target, config, out).await,
        Mode::SelfInfo { target, rejected } => self_info(&target, &rejected, config, out).await,
        Mode::Abuse {
            target,
            max_age_days,
            raw,
        } => abuse(&target, max_age_days, raw, config, out).await,
    }
}

/// Local database over a list; the database is opened once for the whole list
async fn geo_batch<W: Write>(
    input: &Path,
    implicit: bool,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let database = &config.database.path;
    let db = match GeoIP2Database::open(database) {
        Ok(db) => db,
        Err(e) => {
            formatter::write_batch_database_failure(out, input, database, &e)?;
            return Ok(());
        }
    };

    let batch = match Batch::open(input) {
        Ok(batch) => batch,
        Err(LocipError::InputOpen { source, .. })
            if implicit && source.kind() == ErrorKind::NotFound =>
        {
            writeln!(out, "Default file '{}' not found.", input.display())?;
            write_usage(out)?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let processed = batch
        .run(&db, out, |out, target, outcome| {
            match outcome {
                Ok(geo) => formatter::write_city_line(out, target, &geo)?,
                Err(e) => formatter::write_city_failure(out, target, &e)?,
            }
            Ok(())
        })
        .await?;

    log::info!("Processed {} addresses from {}", processed, input.display());
    Ok(())
}

/// Local database, full record; failures are advisory
async fn geo_single<W: Write>(target: &str, config: &AppConfig, out: &mut W) -> Result<()> {
    let database = &config.database.path;
    let outcome = match GeoIP2Database::open(database) {
        Ok(db) => db.resolve(target).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(geo) => formatter::write_full_record(out, target, &geo)?,
        Err(e) => formatter::write_full_record_failure(out, target, database, &e)?,
    }
    Ok(())
}

/// ipinfo.io lookup; a failed lookup is logged, rejected trailing arguments are fatal
async fn self_info<W: Write>(
    target: &str,
    rejected: &[String],
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let outcome = match IpInfoClient::new(&config.ipinfo) {
        Ok(client) => client.resolve(target).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(record) => formatter::write_self_ip(out, &record, config.output.enable_colors)?,
        Err(LocipError::Decode(e)) => log::error!("Error decoding IP info JSON: {}", e),
        Err(e) => log::error!("Error fetching IP info: {}", e),
    }

    if !rejected.is_empty() {
        log::debug!("Rejected arguments after -i: {}", rejected.join(" "));
        writeln!(out)?;
        return Err(LocipError::rejected(
            "Warning: Extra arguments provided with -i option. Processing -i and ignoring others, or use -h for help.",
        ));
    }

    Ok(())
}

/// AbuseIPDB check; every failure here ends the run
async fn abuse<W: Write>(
    target: &str,
    max_age_days: i64,
    raw: bool,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let api_key = CredentialSource::from_config(&config.abuseipdb).resolve()?;
    let client = AbuseIpDbClient::new(&config.abuseipdb, api_key, max_age_days)?;

    let record = client.resolve(target).await?;
    formatter::write_abuse(out, &record, raw)
}
