//! JSON manifest writing shared by both pipelines.

use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Current UTC time in RFC 3339 with millisecond precision and `Z` suffix,
/// the form the site build already consumes.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Writes `value` as pretty-printed JSON (2-space indentation) to `path`,
/// creating parent directories as needed and fully replacing any existing
/// file. No merge with prior content.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
