use crate::domain::{CommitRecord, ReleaseTag};
use crate::error::{CiReleaseError, Result};
use crate::git::ReleaseRepository;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations.
///
/// Commits are stored newest first, matching what the real implementation
/// returns. Created and pushed tags are recorded so tests can assert on
/// them.
pub struct MockRepository {
    commits: Vec<CommitRecord>,
    tags: Vec<ReleaseTag>,
    created_tags: Mutex<Vec<String>>,
    pushed_tags: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            created_tags: Mutex::new(Vec::new()),
            pushed_tags: Mutex::new(Vec::new()),
        }
    }

    /// Append a commit (the first pushed commit is the newest)
    pub fn push_commit(&mut self, commit: CommitRecord) {
        self.commits.push(commit);
    }

    /// Add a tag pointing at a commit sha
    pub fn add_tag(&mut self, name: impl Into<String>, sha: impl Into<String>) {
        self.tags.push(ReleaseTag::new(name, sha));
    }

    /// Tags created through the trait, in order
    pub fn created_tags(&self) -> Vec<String> {
        self.created_tags.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Tags pushed through the trait, in order
    pub fn pushed_tags(&self) -> Vec<String> {
        self.pushed_tags.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseRepository for MockRepository {
    fn list_tags(&self) -> Result<Vec<ReleaseTag>> {
        Ok(self.tags.clone())
    }

    fn commit_page(&self, page: usize, page_size: usize) -> Result<Vec<CommitRecord>> {
        let start = page * page_size;
        if start >= self.commits.len() {
            return Ok(Vec::new());
        }
        let end = (start + page_size).min(self.commits.len());
        Ok(self.commits[start..end].to_vec())
    }

    fn head_sha(&self) -> Result<String> {
        self.commits
            .first()
            .map(|c| c.sha.clone())
            .ok_or_else(|| CiReleaseError::tag("Mock repository has no commits"))
    }

    fn create_tag(&self, name: &str, _sha: &str) -> Result<()> {
        if let Ok(mut created) = self.created_tags.lock() {
            created.push(name.to_string());
        }
        Ok(())
    }

    fn push_tag(&self, _remote: &str, name: &str) -> Result<()> {
        if let Ok(mut pushed) = self.pushed_tags.lock() {
            pushed.push(name.to_string());
        }
        Ok(())
    }
}
