//! Core domain types: versions, commits, and release tags.

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::CommitRecord;
pub use tag::{latest_release_tag, ReleaseTag};
pub use version::{Severity, Version};
