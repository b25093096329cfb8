/// One unit of raw history input: a commit message plus its identifier.
///
/// The identifier may be empty when the source cannot supply one (the
/// classifier then skips the commit-link suffix for that commit). A single
/// record can yield multiple classified entries if its message contains
/// multiple recognized prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full commit identifier (sha), possibly empty
    pub sha: String,
    /// Raw commit message, possibly multi-line
    pub message: String,
}

impl CommitRecord {
    /// Create a new commit record
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        CommitRecord {
            sha: sha.into(),
            message: message.into(),
        }
    }

    /// First 7 characters of the sha, used for commit links
    pub fn short_sha(&self) -> &str {
        &self.sha[..self.sha.len().min(7)]
    }
}
