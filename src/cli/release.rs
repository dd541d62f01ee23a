//! Release workflow: tag the version declared in the version file.
//!
//! Steps run strictly in order and stop at the first failure:
//! 1. Refuse to run on a dirty working copy
//! 2. Describe HEAD to find the latest tag
//! 3. Parse the tag and the version file as semantic versions
//! 4. If the file declares a newer version, create `v<version>` and push it
//!
//! A tag that was created but failed to push is left in place.

use std::io::Write;
use std::path::PathBuf;

use semver::Version;

use crate::domain::{is_newer, parse_declared_version, read_version_file, Tag};
use crate::error::Result;
use crate::git::Repository;
use crate::ui::Prompt;

pub const DIRTY_MESSAGE: &str =
    "Repository is dirty. Please commit or stash your changes before tagging.";
pub const NO_NEW_TAG_MESSAGE: &str =
    "No new tag created. The version in version.txt is not greater than the latest tag.";
pub const TAG_MESSAGE_PROMPT: &str = "Enter tag message: ";

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// File declaring the version to release
    pub version_file: PathBuf,

    /// Remote the new tag is pushed to
    pub remote: String,

    /// Tag message; prompted for when absent
    pub message: Option<String>,

    /// Stop before creating or pushing anything
    pub dry_run: bool,
}

impl Default for ReleaseArgs {
    fn default() -> Self {
        ReleaseArgs {
            version_file: PathBuf::from("version.txt"),
            remote: "origin".to_string(),
            message: None,
            dry_run: false,
        }
    }
}

/// How a release run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// Uncommitted changes; nothing was inspected or tagged
    Dirty,

    /// The declared version is not newer than the latest tag
    UpToDate { latest: Tag, declared: Version },

    /// Dry run: this tag would have been created and pushed
    WouldTag { tag: Tag },

    /// Tag created and pushed
    Tagged { tag: Tag, remote: String },
}

/// Run the release workflow against `repo`.
///
/// Status lines go to `out`; the tag message comes from `args.message` or
/// `prompt`.
pub fn run_release<R, W>(
    repo: &R,
    args: &ReleaseArgs,
    prompt: &mut dyn Prompt,
    out: &mut W,
) -> Result<ReleaseOutcome>
where
    R: Repository + ?Sized,
    W: Write,
{
    if repo.is_dirty()? {
        writeln!(out, "{}", DIRTY_MESSAGE)?;
        return Ok(ReleaseOutcome::Dirty);
    }

    let latest = Tag::from_describe(&repo.describe_latest_tag()?);
    writeln!(out, "Latest tag: {}", latest)?;
    let tag_version = latest.version()?;

    let declared_text = read_version_file(&args.version_file)?;
    writeln!(out, "Version in version.txt: {}", declared_text)?;
    let file_version =
        parse_declared_version(&declared_text, &args.version_file.display().to_string())?;

    if !is_newer(&file_version, &tag_version) {
        writeln!(out, "{}", NO_NEW_TAG_MESSAGE)?;
        return Ok(ReleaseOutcome::UpToDate {
            latest,
            declared: file_version,
        });
    }

    let new_tag = Tag::for_version(&file_version);

    if args.dry_run {
        writeln!(
            out,
            "Dry run: would create tag {} and push it to {}",
            new_tag, args.remote
        )?;
        return Ok(ReleaseOutcome::WouldTag { tag: new_tag });
    }

    writeln!(out, "Creating new tag: {}", file_version)?;
    out.flush()?;

    let message = match &args.message {
        Some(message) => message.clone(),
        None => prompt.ask(TAG_MESSAGE_PROMPT)?,
    };

    repo.create_annotated_tag(&new_tag.name, &message)?;
    repo.push_tag(&args.remote, &new_tag.name)?;

    Ok(ReleaseOutcome::Tagged {
        tag: new_tag,
        remote: args.remote.clone(),
    })
}
