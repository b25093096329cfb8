use std::fmt;

/// Non-fatal conditions met while preparing a release.
/// These are reported to the user but do not abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseWarning {
    /// No new commits since the latest release tag
    NoNewCommits { latest_tag: String },
    /// A prior tag exists but its commit is not in fetched history: the
    /// tool was adopted on a repository with pre-existing tags
    AdoptedRepository { latest_tag: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            ReleaseWarning::AdoptedRepository { latest_tag } => {
                write!(
                    f,
                    "Commit for tag '{}' not found in fetched history; classifying everything fetched",
                    latest_tag
                )
            }
        }
    }
}
