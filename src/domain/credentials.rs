use std::fs;
use std::io::Write;
use std::path::Path;

use regex::Regex;
use tempfile::NamedTempFile;

use crate::error::{Result, ToolError};

pub const ID_KEY: &str = "YA_MUSIC_ID";
pub const TOKEN_KEY: &str = "YA_MUSIC_TOKEN";

/// Account identifier and token as stored in the env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_id: u64,
    pub token: String,
}

impl Credentials {
    pub fn new(account_id: u64, token: impl Into<String>) -> Self {
        Credentials {
            account_id,
            token: token.into(),
        }
    }

    /// Env file body: two `KEY=value` lines, no trailing newline.
    pub fn render(&self) -> String {
        format!(
            "{}={}\n{}={}",
            ID_KEY, self.account_id, TOKEN_KEY, self.token
        )
    }

    /// Write the env file, replacing any existing one.
    ///
    /// The body goes to a temporary file next to `path` which is then renamed
    /// over it, so a failed write never leaves a truncated secrets file.
    pub fn write_env_file(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(self.render().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        Ok(())
    }

    /// Load credentials previously written by [`Credentials::write_env_file`].
    ///
    /// Values are read back literally, everything after the first `=` up to
    /// the end of the line, so any token [`Credentials::render`] wrote comes
    /// back unchanged. Lines that are not `KEY=value` are ignored.
    pub fn load_env_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::credentials(format!(
                "'{}' not found; run `yamusic-tools get-id` first",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ToolError::credentials(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let line_pattern = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)=(.*)$")
            .map_err(|e| ToolError::credentials(format!("Invalid env line pattern: {}", e)))?;

        let mut account_id = None;
        let mut token = None;
        for line in content.split('\n') {
            let Some(caps) = line_pattern.captures(line) else {
                continue;
            };
            let value = caps[2].to_string();
            match &caps[1] {
                ID_KEY => account_id = Some(value),
                TOKEN_KEY => token = Some(value),
                _ => {}
            }
        }

        let account_id = account_id
            .ok_or_else(|| ToolError::credentials(format!("{} is missing", ID_KEY)))?;
        let account_id = account_id.trim().parse::<u64>().map_err(|_| {
            ToolError::credentials(format!("{} is not numeric: '{}'", ID_KEY, account_id))
        })?;
        let token =
            token.ok_or_else(|| ToolError::credentials(format!("{} is missing", TOKEN_KEY)))?;

        Ok(Credentials { account_id, token })
    }
}

/// Reject an empty token. Anything else is stored as given.
pub fn check_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(ToolError::credentials("token is empty"));
    }
    Ok(())
}
