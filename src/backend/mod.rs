//! Backend module for locip
//!
//! Every data source sits behind the same `Resolver` capability so the router
//! and the batch processor never care which one they are driving.
//!
//! # Module Organization
//!
//! - `types`: Record types returned by the backends
//! - `traits`: The `Resolver` trait
//! - Backend implementations: geoip2 (local file), ipinfo, abuseipdb

// Core modules
pub mod traits;
pub mod types;

// Backend implementation modules
pub mod abuseipdb;
pub mod geoip2;
pub mod ipinfo;

// Re-export core types and traits for convenience
pub use traits::Resolver;
pub use types::{AbuseRecord, GeoRecord, SelfIpRecord};

// Re-export backend implementations
pub use abuseipdb::AbuseIpDbClient;
pub use geoip2::GeoIP2Database;
pub use ipinfo::IpInfoClient;
