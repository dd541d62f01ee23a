//! Command workflows, kept apart from argument parsing so they can be driven
//! programmatically and in tests.

pub mod credentials;
pub mod release;

pub use credentials::{run_get_id, run_verify, ResolvedAccount};
pub use release::{run_release, ReleaseArgs, ReleaseOutcome};
