use semver::Version;

use crate::error::{Result, ToolError};

/// Prefix every release tag carries in front of its semantic version.
pub const TAG_PREFIX: char = 'v';

/// Represents a git tag name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Release tag for a version (e.g., 1.2.3 -> "v1.2.3")
    pub fn for_version(version: &Version) -> Self {
        Tag {
            name: format!("{}{}", TAG_PREFIX, version),
        }
    }

    /// Extract the candidate tag from long-format describe output: the text
    /// before the first `-`.
    ///
    /// `v1.2.3-4-gabc123` yields `v1.2.3`. Pre-release tags lose their suffix
    /// too (`v2.0.0-rc.1-3-gabc123` yields `v2.0.0`), so release tags are
    /// expected to be plain `v<major>.<minor>.<patch>`.
    pub fn from_describe(output: &str) -> Self {
        let output = output.trim();
        Tag::new(output.split('-').next().unwrap_or(output))
    }

    /// Parse the semantic version this tag names.
    ///
    /// The tag must be exactly `v<semver>`. Anything else is rejected with an
    /// error naming the tag, never coerced to a default version.
    pub fn version(&self) -> Result<Version> {
        let version_part = self.name.strip_prefix(TAG_PREFIX).ok_or_else(|| {
            ToolError::malformed_tag(
                &self.name,
                format!(
                    "expected '{}<major>.<minor>.<patch>' (is a release tag reachable from HEAD?)",
                    TAG_PREFIX
                ),
            )
        })?;

        Version::parse(version_part)
            .map_err(|e| ToolError::malformed_tag(&self.name, e.to_string()))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
