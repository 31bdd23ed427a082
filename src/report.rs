//! JSON decoding and permissive navigation of Lighthouse audit reports.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::SummaryError;

pub const GREEN_HOST_AUDIT: &str = "green-host-audit";
pub const CDN_USAGE_AUDIT: &str = "cdn-usage-audit";
pub const REFRESH_FREQUENCY_AUDIT: &str = "refresh-frequency-audit";
pub const SERVER_DATA_RETENTION_AUDIT: &str = "server-data-retention";

/// One decoded report. The document is kept untyped; every accessor
/// falls back to `Value::Null` or an empty slice instead of failing.
#[derive(Debug, Clone)]
pub struct Report {
    doc: Value,
}

impl Report {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    /// The `finalUrl` of the audited page, or `""` when absent.
    pub fn final_url(&self) -> &str {
        self.doc["finalUrl"].as_str().unwrap_or_default()
    }

    /// `audits[<audit>].details`, `Null` if any level is missing.
    pub fn details(&self, audit: &str) -> &Value {
        &self.doc["audits"][audit]["details"]
    }
}

/// `details.items` as a slice; empty when missing or not an array.
pub fn items(details: &Value) -> &[Value] {
    details["items"].as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Decodes a report from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 JSON.
pub fn parse_report(bytes: &[u8]) -> Result<Report, serde_json::Error> {
    Ok(Report::new(serde_json::from_slice(bytes)?))
}

/// Reads and decodes the report at `path`.
pub fn load_report(path: &Path) -> Result<Report, SummaryError> {
    let bytes = std::fs::read(path).map_err(|source| SummaryError::InputAccess {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Report bytes read, parsing");

    parse_report(&bytes).map_err(|source| SummaryError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
