use crate::error::{Result, ToolError};
use crate::git::Repository;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
///
/// Created tags become the nearest tag for later describe queries, so a second
/// release run sees the tag the first one made.
pub struct MockRepository {
    dirty: bool,
    describe: Mutex<String>,
    tags: Mutex<Vec<(String, String)>>,
    pushed: Mutex<Vec<(String, String)>>,
    fail_push: bool,
}

impl MockRepository {
    /// Create a clean mock repository whose describe query returns `describe`
    pub fn new(describe: impl Into<String>) -> Self {
        MockRepository {
            dirty: false,
            describe: Mutex::new(describe.into()),
            tags: Mutex::new(Vec::new()),
            pushed: Mutex::new(Vec::new()),
            fail_push: false,
        }
    }

    /// Mark the working copy as having uncommitted changes
    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    /// Make every push fail as if the remote rejected it
    pub fn with_failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Tags created so far, as `(name, message)` pairs
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.tags.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Tags pushed so far, as `(remote, name)` pairs
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

fn poisoned() -> ToolError {
    ToolError::Git(git2::Error::from_str("mock repository lock poisoned"))
}

impl Repository for MockRepository {
    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn describe_latest_tag(&self) -> Result<String> {
        self.describe.lock().map(|d| d.clone()).map_err(|_| poisoned())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut tags = self.tags.lock().map_err(|_| poisoned())?;
        if tags.iter().any(|(existing, _)| existing == name) {
            return Err(ToolError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        tags.push((name.to_string(), message.to_string()));

        *self.describe.lock().map_err(|_| poisoned())? = format!("{}-0-g0000000", name);
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        if self.fail_push {
            return Err(ToolError::remote(format!("push of '{}' rejected", tag_name)));
        }
        self.pushed
            .lock()
            .map_err(|_| poisoned())?
            .push((remote.to_string(), tag_name.to_string()));
        Ok(())
    }
}
