//! Repository access abstraction.
//!
//! The release pipeline depends on the [ReleaseRepository] trait rather than
//! concrete implementations:
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! History is consumed through [fetch_history], which pages through commits
//! newest-first and stops as soon as the cutoff commit shows up or the
//! history runs out.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{CommitRecord, ReleaseTag};
use crate::error::Result;

/// Default number of commits fetched per history page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Narrow interface over the repository hosting the release.
///
/// Implementors must be `Send + Sync` so the pipeline can hold the
/// repository behind shared references.
pub trait ReleaseRepository: Send + Sync {
    /// All tags in the repository with the commit sha each points at
    fn list_tags(&self) -> Result<Vec<ReleaseTag>>;

    /// One page of commit history, newest first.
    ///
    /// `page` is zero-based. A page shorter than `page_size` marks the end
    /// of history.
    fn commit_page(&self, page: usize, page_size: usize) -> Result<Vec<CommitRecord>>;

    /// Identifier of the current HEAD commit
    fn head_sha(&self) -> Result<String>;

    /// Create a lightweight tag pointing at the given commit
    fn create_tag(&self, name: &str, sha: &str) -> Result<()>;

    /// Push a tag to a remote
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}

/// Fetch commit history page by page until the cutoff is covered.
///
/// Pages are requested sequentially so pagination can stop early: fetching
/// ends when a page contains the cutoff sha, or when a short page signals the
/// end of history. Every fetched commit is returned; there is no cap on the
/// total, so ranges spanning multiple pages classify completely.
pub fn fetch_history<R: ReleaseRepository + ?Sized>(
    repo: &R,
    cutoff: Option<&str>,
    page_size: usize,
) -> Result<Vec<CommitRecord>> {
    let mut all = Vec::new();
    let mut page = 0;

    loop {
        let batch = repo.commit_page(page, page_size)?;
        let end_of_history = batch.len() < page_size;
        let covers_cutoff = match cutoff {
            Some(sha) => batch.iter().any(|c| c.sha == sha),
            None => false,
        };

        all.extend(batch);

        if end_of_history || covers_cutoff {
            break;
        }
        page += 1;
    }

    Ok(all)
}
