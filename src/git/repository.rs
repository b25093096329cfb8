use crate::domain::{CommitRecord, ReleaseTag};
use crate::error::{CiReleaseError, Result};
use crate::git::ReleaseRepository;
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl ReleaseRepository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<ReleaseTag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .map_err(|e| CiReleaseError::tag(format!("Cannot resolve tag '{}': {}", name, e)))?;
            // Annotated tags peel to the commit they annotate
            let commit = reference
                .peel_to_commit()
                .map_err(|e| CiReleaseError::tag(format!("Cannot peel tag '{}': {}", name, e)))?;
            tags.push(ReleaseTag::new(name, commit.id().to_string()));
        }

        Ok(tags)
    }

    fn commit_page(&self, page: usize, page_size: usize) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid_result in revwalk.skip(page * page_size).take(page_size) {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = commit.message().unwrap_or("").to_string();
            commits.push(CommitRecord::new(oid.to_string(), message));
        }

        Ok(commits)
    }

    fn head_sha(&self) -> Result<String> {
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn create_tag(&self, name: &str, sha: &str) -> Result<()> {
        let oid = Oid::from_str(sha)
            .map_err(|e| CiReleaseError::tag(format!("Invalid commit sha '{}': {}", sha, e)))?;
        let object = self
            .repo
            .find_object(oid, None)
            .map_err(|e| CiReleaseError::tag(format!("Cannot find object: {}", e)))?;

        self.repo
            .tag_lightweight(name, &object, false)
            .map_err(|e| CiReleaseError::tag(format!("Cannot create tag: {}", e)))?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| CiReleaseError::remote(format!("Cannot find remote: {}", e)))?;

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote
            .push(&[refspec.as_str()], None)
            .map_err(|e| CiReleaseError::remote(format!("Push failed: {}", e)))?;

        Ok(())
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}
