//! Trait definitions for the backend module

use crate::error::Result;

/// A data source that turns one lookup target into one record
///
/// Each call is independent: a failure for one target says nothing about the next.
pub trait Resolver {
    type Record;

    /// Human-readable name of the source, used in headers and log lines
    fn name(&self) -> &str;

    /// Resolve a single target (an IP literal, or a hostname for the web backends)
    async fn resolve(&self, target: &str) -> Result<Self::Record>;
}
