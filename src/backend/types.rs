//! Type definitions for the backend module
//!
//! Records returned by the three backends.

use serde::{Deserialize, Serialize};

/// Region shown when the database has no subdivision for an address
pub const UNKNOWN_REGION: &str = "Unknown";

/// Location from the local GeoLite2 database
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub city: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoRecord {
    /// Build a record from English place names
    ///
    /// `subdivision` is `None` when the record carries no subdivisions at all,
    /// which yields the `Unknown` region. A subdivision without an English name
    /// yields an empty region.
    pub fn from_names(
        city: Option<&str>,
        subdivision: Option<Option<&str>>,
        country: Option<&str>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let region = match subdivision {
            Some(name) => name.unwrap_or_default().to_string(),
            None => UNKNOWN_REGION.to_string(),
        };

        Self {
            city: city.unwrap_or_default().to_string(),
            region,
            country: country.unwrap_or_default().to_string(),
            latitude,
            longitude,
        }
    }

    /// True when city, region and country are all empty
    pub fn is_unavailable(&self) -> bool {
        self.city.is_empty() && self.region.is_empty() && self.country.is_empty()
    }
}

/// Response from ipinfo.io
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelfIpRecord {
    pub ip: Option<String>,
    pub hostname: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub loc: Option<String>,
    pub org: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
    pub readme: Option<String>,
}

impl SelfIpRecord {
    /// Labelled fields to display, IP first, empty ones left out
    pub fn display_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("IP", &self.ip),
            ("Hostname", &self.hostname),
            ("City", &self.city),
            ("Region", &self.region),
            ("Country", &self.country),
            ("Location", &self.loc),
            ("Organization", &self.org),
            ("Postal Code", &self.postal),
            ("Timezone", &self.timezone),
        ]
        .into_iter()
        .filter_map(|(label, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((label, v)),
            _ => None,
        })
        .collect()
    }
}

/// The `data` object of an AbuseIPDB check response
///
/// Serializes back with the service's own key names for raw output.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbuseRecord {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub abuse_confidence_score: u32,
    #[serde(default)]
    pub total_reports: u64,
    pub last_reported_at: Option<String>,
    pub usage_type: Option<String>,
    pub domain: Option<String>,
    pub country_code: Option<String>,
    pub isp: Option<String>,
    /// Kept verbatim, only present with `verbose` requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports: Option<serde_json::Value>,
}

impl AbuseRecord {
    /// Last report timestamp, or `-` when there is none
    pub fn last_seen(&self) -> &str {
        match self.last_reported_at.as_deref() {
            Some(ts) if !ts.is_empty() => ts,
            _ => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_defaults_to_unknown() {
        let record = GeoRecord::from_names(Some("Paris"), None, Some("France"), 48.85, 2.35);
        assert_eq!(record.region, "Unknown");
        assert!(!record.is_unavailable());
    }

    #[test]
    fn test_unnamed_subdivision_is_empty() {
        let record = GeoRecord::from_names(None, Some(None), None, 0.0, 0.0);
        assert_eq!(record.region, "");
        assert!(record.is_unavailable());
    }

    #[test]
    fn test_no_names_with_unknown_region_is_available() {
        let record = GeoRecord::from_names(None, None, None, 0.0, 0.0);
        assert_eq!(record.city, "");
        assert_eq!(record.country, "");
        assert!(!record.is_unavailable());
    }

    #[test]
    fn test_self_ip_display_fields() {
        let record: SelfIpRecord = serde_json::from_str(
            r#"{"ip":"8.8.8.8","hostname":"dns.google","city":"Mountain View",
                "region":"California","country":"US","loc":"37.4056,-122.0775",
                "org":"AS15169 Google LLC","postal":"","timezone":"America/Los_Angeles",
                "readme":"https://ipinfo.io/missingauth"}"#,
        )
        .unwrap();

        let fields = record.display_fields();
        assert_eq!(fields[0], ("IP", "8.8.8.8"));
        assert_eq!(fields[1], ("Hostname", "dns.google"));
        assert!(fields.iter().all(|(label, _)| *label != "Postal Code"));
        assert_eq!(fields.len(), 8);
    }

    #[test]
    fn test_self_ip_missing_fields() {
        let record: SelfIpRecord = serde_json::from_str(r#"{"ip":"1.1.1.1"}"#).unwrap();
        assert_eq!(record.display_fields(), vec![("IP", "1.1.1.1")]);
    }

    #[test]
    fn test_abuse_record_decode() {
        let record: AbuseRecord = serde_json::from_str(
            r#"{"ipAddress":"118.25.6.39","isPublic":true,"abuseConfidenceScore":100,
                "totalReports":42,"lastReportedAt":"2024-05-01T10:00:00+00:00",
                "usageType":"Data Center","domain":"tencent.com","countryCode":"CN",
                "isp":"Tencent Cloud","reports":[]}"#,
        )
        .unwrap();

        assert_eq!(record.ip_address, "118.25.6.39");
        assert_eq!(record.abuse_confidence_score, 100);
        assert_eq!(record.total_reports, 42);
        assert_eq!(record.last_seen(), "2024-05-01T10:00:00+00:00");
        assert_eq!(record.reports, Some(serde_json::json!([])));
    }

    #[test]
    fn test_abuse_last_seen_placeholder() {
        let mut record = AbuseRecord::default();
        assert_eq!(record.last_seen(), "-");
        record.last_reported_at = Some(String::new());
        assert_eq!(record.last_seen(), "-");
    }

    #[test]
    fn test_abuse_raw_serialization() {
        let record: AbuseRecord = serde_json::from_str(
            r#"{"ipAddress":"1.2.3.4","abuseConfidenceScore":0,"totalReports":0,"lastReportedAt":null}"#,
        )
        .unwrap();

        let raw = serde_json::to_value(&record).unwrap();
        assert_eq!(raw["ipAddress"], "1.2.3.4");
        assert!(raw["lastReportedAt"].is_null());
        assert!(raw["isp"].is_null());
        assert!(raw.get("reports").is_none());
    }
}
