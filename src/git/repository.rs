use crate::error::{Result, ToolError};
use git2::{
    Cred, CredentialType, DescribeFormatOptions, DescribeOptions, ErrorClass, PushOptions,
    RemoteCallbacks, Repository as Git2Repo, Status, StatusOptions,
};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

/// Credentials for fetch/push: SSH key files, then the SSH agent, then git
/// defaults (credential helpers).
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .any(|entry| entry.status() != Status::CURRENT && !entry.status().is_ignored()))
    }

    fn describe_latest_tag(&self) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags().show_commit_oid_as_fallback(true);

        let describe = self.repo.describe(&options)?;

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true);

        Ok(describe.format(Some(&format))?)
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = self.repo.signature()?;

        self.repo.tag(name, head.as_object(), &tagger, message, false)?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|_| ToolError::remote(format!("No remote named '{}' found", remote)))?;

        let mut callbacks = remote_callbacks();

        // Rejections are reported per reference, not as a push error.
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "{} rejected: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);

        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                ErrorClass::Net => ToolError::remote(format!("Network error during push: {}", e)),
                ErrorClass::Reference => {
                    ToolError::remote(format!("Reference error during push: {}", e))
                }
                _ => ToolError::remote(format!(
                    "Failed to push tag '{}' to '{}': {}",
                    tag_name, remote, e
                )),
            })
    }
}
