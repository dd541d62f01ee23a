//! Yandex Music account API
//!
//! Only the account status endpoint is used: it authenticates a token and
//! returns the profile carrying the numeric account id. [AccountService] is
//! the seam; [client::YandexMusicClient] talks HTTP and
//! [mock::StubAccountService] answers from memory.

pub mod client;
pub mod mock;

pub use client::YandexMusicClient;
pub use mock::StubAccountService;

use serde::Deserialize;

use crate::error::{Result, ToolError};

/// Account section of the status profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub uid: Option<u64>,
    pub login: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Profile returned by `GET /account/status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountStatus {
    pub account: Account,
}

impl AccountStatus {
    /// Numeric account id; a profile without one is a malformed response.
    pub fn uid(&self) -> Result<u64> {
        self.account
            .uid
            .ok_or_else(|| ToolError::api("account profile has no uid (is the token valid?)"))
    }
}

/// Authenticates a token against the music service.
pub trait AccountService {
    /// Fetch the account profile for `token`.
    fn account_status(&self, token: &str) -> Result<AccountStatus>;
}
