use semver::Version;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::error::{Result, ToolError};

/// Read the declared version from a version file, trimmed of surrounding
/// whitespace. The text is returned unparsed so callers can echo it first.
pub fn read_version_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| {
        ToolError::version(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    Ok(text.trim().to_string())
}

/// Parse version text taken from `source` (a file name, used in the error).
pub fn parse_declared_version(text: &str, source: &str) -> Result<Version> {
    Version::parse(text.trim()).map_err(|e| {
        ToolError::version(format!(
            "Invalid version '{}' in {}: {}",
            text.trim(),
            source,
            e
        ))
    })
}

/// Whether `candidate` should be released over `current`.
///
/// Uses SemVer precedence, so build metadata alone never makes a version newer.
pub fn is_newer(candidate: &Version, current: &Version) -> bool {
    candidate.cmp_precedence(current) == Ordering::Greater
}
