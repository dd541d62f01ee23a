use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{AccountService, AccountStatus};
use crate::error::{Result, ToolError};

const USER_AGENT: &str = concat!("yamusic-tools/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the Yandex Music API.
pub struct YandexMusicClient {
    http: Client,
    base_url: String,
}

impl YandexMusicClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(YandexMusicClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn auth_headers(token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("OAuth {}", token))
                .map_err(|_| ToolError::credentials("token contains invalid header characters"))?,
        );
        Ok(headers)
    }
}

impl AccountService for YandexMusicClient {
    fn account_status(&self, token: &str) -> Result<AccountStatus> {
        let response = self
            .http
            .get(format!("{}/account/status", self.base_url))
            .headers(Self::auth_headers(token)?)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        parse_account_status(status, &body)
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    name: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    result: Option<AccountStatus>,
    error: Option<ApiErrorBody>,
}

/// Decode an account status response.
///
/// Error bodies (`{"error": {"name", "message"}}`) and non-success statuses
/// become [ToolError::Api].
pub fn parse_account_status(status: StatusCode, body: &str) -> Result<AccountStatus> {
    let envelope: Option<Envelope> = serde_json::from_str(body).ok();

    if let Some(Envelope {
        error: Some(error), ..
    }) = &envelope
    {
        return Err(ToolError::api(format!(
            "{} ({}): {}",
            error.name.as_deref().unwrap_or("error"),
            status,
            error.message.as_deref().unwrap_or("no message")
        )));
    }

    if !status.is_success() {
        return Err(ToolError::api(format!(
            "authentication failed with HTTP {}",
            status
        )));
    }

    envelope
        .and_then(|e| e.result)
        .ok_or_else(|| ToolError::api("malformed account status response"))
}
