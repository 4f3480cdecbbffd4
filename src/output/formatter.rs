//! Record formatters

use crate::backend::{AbuseRecord, GeoRecord, SelfIpRecord};
use crate::error::{LocipError, Result};
use std::io::{self, Write};
use std::path::Path;

#[cfg(feature = "colored-output")]
use colored::Colorize;

/// Full geolocation block for a single target
pub fn write_full_record<W: Write>(out: &mut W, target: &str, geo: &GeoRecord) -> io::Result<()> {
    writeln!(out, "[*] Target: {} Geo-located.", target)?;
    if geo.is_unavailable() {
        writeln!(out, "[+] Information not available in local DB")?;
    } else {
        writeln!(out, "[+] {}, {}, {}", geo.city, geo.region, geo.country)?;
    }
    writeln!(
        out,
        "[+] Latitude: {:.6}, Longitude: {:.6}",
        geo.latitude, geo.longitude
    )
}

/// One line per batch entry: `[+] <ip> -> city, region, country`
pub fn write_city_line<W: Write>(out: &mut W, target: &str, geo: &GeoRecord) -> io::Result<()> {
    if geo.is_unavailable() {
        writeln!(out, "[+] {} -> Information not available in local DB", target)
    } else {
        writeln!(
            out,
            "[+] {} -> {}, {}, {}",
            target, geo.city, geo.region, geo.country
        )
    }
}

/// Batch entry whose lookup failed
pub fn write_city_failure<W: Write>(
    out: &mut W,
    target: &str,
    err: &LocipError,
) -> io::Result<()> {
    writeln!(
        out,
        "[!] Could not retrieve city details for {} from local database: {}",
        target, err
    )?;
    writeln!(out, "[+] {} -> Error looking up in local DB", target)
}

/// Advisory for a single-target lookup that could not be answered locally
pub fn write_full_record_failure<W: Write>(
    out: &mut W,
    target: &str,
    database: &Path,
    err: &LocipError,
) -> io::Result<()> {
    match err {
        LocipError::DatabaseNotFound(_) => {
            writeln!(
                out,
                "Error: Could not access local GeoLite2 database to look up {}.",
                target
            )?;
            writeln!(out, "Reason: database file not found")?;
            writeln!(
                out,
                "Please ensure the database file exists at {}.",
                database.display()
            )?;
            writeln!(out, "Alternatively, try 'locip -i {}' for an online lookup.", target)
        }
        LocipError::DatabaseInvalid { reason, .. } => {
            writeln!(
                out,
                "Error: Could not access local GeoLite2 database to look up {}.",
                target
            )?;
            writeln!(out, "Reason: database file is invalid: {}", reason)?;
            writeln!(
                out,
                "Please ensure the database file at {} is a valid GeoLite2-City database.",
                database.display()
            )?;
            writeln!(out, "Alternatively, try 'locip -i {}' for an online lookup.", target)
        }
        _ => {
            writeln!(
                out,
                "Error: Could not retrieve GeoIP details for {} from the local database.",
                target
            )?;
            writeln!(out, "Reason: {}", err)?;
            writeln!(
                out,
                "Consider using 'locip -i {}' for an alternative online lookup.",
                target
            )
        }
    }
}

/// Advisory when a list cannot be processed because the database did not open
pub fn write_batch_database_failure<W: Write>(
    out: &mut W,
    input: &Path,
    database: &Path,
    err: &LocipError,
) -> io::Result<()> {
    writeln!(
        out,
        "Error: Cannot process file '{}' using the local GeoLite2 database.",
        input.display()
    )?;
    writeln!(
        out,
        "Reason: Failed to open database at '{}': {}",
        database.display(),
        err
    )?;
    writeln!(
        out,
        "Please ensure the database file exists and is valid, or use the '-i <ip>' option for individual online lookups."
    )
}

/// ipinfo.io block, one labelled line per non-empty field
pub fn write_self_ip<W: Write>(out: &mut W, record: &SelfIpRecord, use_color: bool) -> io::Result<()> {
    writeln!(out)?;
    for (label, value) in record.display_fields() {
        let label = format!("{}:", label);
        if use_color {
            #[cfg(feature = "colored-output")]
            {
                writeln!(out, "{} {}", label.blue(), value.yellow())?;
            }
            #[cfg(not(feature = "colored-output"))]
            {
                writeln!(out, "{} {}", label, value)?;
            }
        } else {
            writeln!(out, "{} {}", label, value)?;
        }
    }
    Ok(())
}

/// AbuseIPDB result, as pretty JSON in raw mode or a tab-separated summary
pub fn write_abuse<W: Write>(out: &mut W, record: &AbuseRecord, raw: bool) -> Result<()> {
    if raw {
        let json = serde_json::to_string_pretty(record)?;
        writeln!(out, "{}", json)?;
    } else {
        writeln!(
            out,
            "{}\tabuseScore={}\treports={}\tlastSeen={}",
            record.ip_address,
            record.abuse_confidence_score,
            record.total_reports,
            record.last_seen()
        )?;
    }
    Ok(())
}
