//! `get-id` and `verify`: resolve the account id behind a token and keep both
//! in the env file the player reads on start-up.

use std::path::Path;

use crate::domain::credentials::check_token;
use crate::domain::Credentials;
use crate::error::{Result, ToolError};
use crate::music::{AccountService, AccountStatus};
use crate::ui::Prompt;

pub const TOKEN_PROMPT: &str = "Enter your Yandex Music token: ";

/// Result of a credentials command
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccount {
    pub credentials: Credentials,
    pub login: Option<String>,
}

fn authenticate<S>(service: &S, token: &str) -> Result<(AccountStatus, u64)>
where
    S: AccountService + ?Sized,
{
    let status = service.account_status(token)?;
    let uid = status.uid()?;
    Ok((status, uid))
}

/// Resolve the account id for a token and write the env file at `output`.
///
/// The token comes from `token` or, when absent, from `prompt`, and is used
/// and stored exactly as given.
pub fn run_get_id<S>(
    service: &S,
    prompt: &mut dyn Prompt,
    token: Option<String>,
    output: &Path,
) -> Result<ResolvedAccount>
where
    S: AccountService + ?Sized,
{
    let token = match token {
        Some(token) => token,
        None => prompt.ask(TOKEN_PROMPT)?,
    };
    check_token(&token)?;

    let (status, uid) = authenticate(service, &token)?;

    let credentials = Credentials::new(uid, token);
    credentials.write_env_file(output)?;

    Ok(ResolvedAccount {
        credentials,
        login: status.account.login,
    })
}

/// Check that the token stored in `env_file` still resolves to the stored id.
pub fn run_verify<S>(service: &S, env_file: &Path) -> Result<ResolvedAccount>
where
    S: AccountService + ?Sized,
{
    let credentials = Credentials::load_env_file(env_file)?;
    let (status, uid) = authenticate(service, &credentials.token)?;

    if uid != credentials.account_id {
        return Err(ToolError::credentials(format!(
            "token belongs to account {} but {} records {}",
            uid,
            env_file.display(),
            credentials.account_id
        )));
    }

    Ok(ResolvedAccount {
        credentials,
        login: status.account.login,
    })
}
