//! GeoIP2 database implementation
//!
//! Reads a MaxMind GeoLite2-City file. The reader is opened once and shared by
//! every lookup of a run; it is released when the value is dropped.

use crate::backend::{GeoRecord, Resolver};
use crate::error::{LocipError, Result};
use maxminddb::{MaxMindDBError, geoip2};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;

/// GeoIP2 database implementation
pub struct GeoIP2Database {
    reader: maxminddb::Reader<Vec<u8>>,
}

impl GeoIP2Database {
    /// Open the database file
    ///
    /// A missing file is reported as `DatabaseNotFound`; anything else that keeps
    /// the reader from loading is `DatabaseInvalid`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LocipError::DatabaseNotFound(path.to_path_buf()));
        }

        log::info!("Loading GeoIP2 database from: {}", path.display());

        let reader =
            maxminddb::Reader::open_readfile(path).map_err(|e| LocipError::DatabaseInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        log::info!("Successfully loaded GeoIP2 database from: {}", path.display());

        Ok(Self { reader })
    }

    /// Look up a textual IP address
    fn lookup(&self, target: &str) -> Result<GeoRecord> {
        let ip: IpAddr = target
            .parse()
            .map_err(|_| LocipError::InvalidIp(target.to_string()))?;

        match self.reader.lookup::<geoip2::City>(ip) {
            Ok(city) => Ok(to_record(&city)),
            Err(MaxMindDBError::AddressNotFoundError(_)) => {
                Err(LocipError::AddressNotFound(target.to_string()))
            }
            Err(e) => Err(LocipError::Lookup(e.to_string())),
        }
    }
}

impl Resolver for GeoIP2Database {
    type Record = GeoRecord;

    fn name(&self) -> &str {
        "local DB"
    }

    async fn resolve(&self, target: &str) -> Result<GeoRecord> {
        self.lookup(target)
    }
}

fn english<'a>(names: Option<&BTreeMap<&'a str, &'a str>>) -> Option<&'a str> {
    names.and_then(|n| n.get("en").copied())
}

fn to_record(city: &geoip2::City) -> GeoRecord {
    let city_name = english(city.city.as_ref().and_then(|c| c.names.as_ref()));

    let subdivision = city
        .subdivisions
        .as_ref()
        .and_then(|subs| subs.first())
        .map(|sub| english(sub.names.as_ref()));

    let country = english(city.country.as_ref().and_then(|c| c.names.as_ref()));

    let latitude = city
        .location
        .as_ref()
        .and_then(|l| l.latitude)
        .unwrap_or_default();
    let longitude = city
        .location
        .as_ref()
        .and_then(|l| l.longitude)
        .unwrap_or_default();

    GeoRecord::from_names(city_name, subdivision, country, latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("GeoLite2-City.mmdb");
        assert!(matches!(
            GeoIP2Database::open(&path),
            Err(LocipError::DatabaseNotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_open_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("GeoLite2-City.mmdb");
        std::fs::write(&path, b"definitely not a maxmind database").unwrap();
        assert!(matches!(
            GeoIP2Database::open(&path),
            Err(LocipError::DatabaseInvalid { .. })
        ));
    }

    #[test]
    fn test_english_names() {
        let mut names = BTreeMap::new();
        names.insert("de", "Frankreich");
        names.insert("en", "France");
        assert_eq!(english(Some(&names)), Some("France"));
        assert_eq!(english(None), None);
    }
}
