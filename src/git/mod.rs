//! Git operations abstraction layer
//!
//! The release workflow only needs four things from a repository: a
//! cleanliness check, a describe query, annotated tag creation and a tag push.
//! They are expressed by the [Repository] trait so the workflow can run
//! against a real repository ([repository::Git2Repository]) or an in-memory
//! one ([mock::MockRepository]).
//!
//! ```rust
//! # use yamusic_tools::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! if !repo.is_dirty()? {
//!     println!("nearest tag: {}", repo.describe_latest_tag()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// All methods return [crate::error::Result<T>]; implementations map
/// `git2::Error` and remote failures to [crate::error::ToolError] variants.
pub trait Repository: Send {
    /// Whether the working copy has any change, tracked or untracked.
    ///
    /// Ignored files do not count.
    fn is_dirty(&self) -> Result<bool>;

    /// Describe HEAD: nearest reachable tag (lightweight or annotated) in long
    /// format, `<tag>-<count>-g<hash>`, falling back to the abbreviated commit
    /// id when no tag is reachable.
    fn describe_latest_tag(&self) -> Result<String>;

    /// Create an annotated tag on HEAD.
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, HEAD is unborn, or no signature is configured
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag reference (`refs/tags/<name>`) to a remote.
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;
}
