//! Output module - everything the user sees on stdout
//!
//! Formatters write into any `std::io::Write` so the same inputs always give the
//! same bytes.

pub mod formatter;
pub mod usage;

pub use usage::write_usage;
