use std::collections::HashMap;
use std::sync::Mutex;

use super::{Account, AccountService, AccountStatus};
use crate::error::{Result, ToolError};

/// In-memory account service mapping tokens to account ids.
#[derive(Default)]
pub struct StubAccountService {
    accounts: HashMap<String, u64>,
    calls: Mutex<Vec<String>>,
}

impl StubAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` and report `uid` for it
    pub fn with_account(mut self, token: impl Into<String>, uid: u64) -> Self {
        self.accounts.insert(token.into(), uid);
        self
    }

    /// Tokens the service was asked about, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl AccountService for StubAccountService {
    fn account_status(&self, token: &str) -> Result<AccountStatus> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(token.to_string());
        }

        let uid = self.accounts.get(token).copied().ok_or_else(|| {
            ToolError::api("session-expired (401 Unauthorized): Your OAuth token is invalid")
        })?;

        Ok(AccountStatus {
            account: Account {
                uid: Some(uid),
                login: None,
                display_name: None,
            },
        })
    }
}
