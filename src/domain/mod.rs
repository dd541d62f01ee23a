//! Domain logic - pure release rules independent of git operations

pub mod credentials;
pub mod tag;
pub mod version;

pub use credentials::Credentials;
pub use tag::{Tag, TAG_PREFIX};
pub use version::{is_newer, parse_declared_version, read_version_file};
