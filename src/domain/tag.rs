use crate::domain::Version;
use crate::error::{CiReleaseError, Result};

/// A release tag: name (e.g., "v1.2.3") plus the commit it points at.
///
/// The commit sha is the cutoff used by the classifier: commits at or below
/// it belong to an already published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    pub commit_sha: String,
}

impl ReleaseTag {
    /// Create a new release tag
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        ReleaseTag {
            name: name.into(),
            commit_sha: commit_sha.into(),
        }
    }

    /// Parse the version carried by this tag, given the configured prefix
    pub fn version(&self, prefix: &str) -> Result<Version> {
        let rest = self.name.strip_prefix(prefix).ok_or_else(|| {
            CiReleaseError::tag(format!(
                "Tag '{}' does not start with prefix '{}'",
                self.name, prefix
            ))
        })?;
        Version::parse(rest)
    }
}

/// Find the most recent release tag by prefix-matched version lookup.
///
/// Tags that do not start with the prefix are ignored (they belong to other
/// tooling). A tag that matches the prefix but carries a malformed version
/// fails fast, per the error policy for malformed input.
pub fn latest_release_tag<'a>(
    tags: &'a [ReleaseTag],
    prefix: &str,
) -> Result<Option<(&'a ReleaseTag, Version)>> {
    let mut latest: Option<(&ReleaseTag, Version)> = None;

    for tag in tags {
        if !tag.name.starts_with(prefix) {
            continue;
        }
        let version = tag.version(prefix)?;
        match &latest {
            Some((_, best)) if *best >= version => {}
            _ => latest = Some((tag, version)),
        }
    }

    Ok(latest)
}
