use crate::domain::{CommitRecord, Severity, Version};
use crate::grammar::{GrammarRules, LineKind};

/// Changelog line emitted for a release with no prior tags
pub const INITIAL_RELEASE_NOTE: &str = "🎉 Initial release";

/// One logical change extracted from a commit message.
///
/// Transient: created during classification, rendered into a bucket string,
/// then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub severity: Severity,
    pub scope: Option<String>,
    /// Description lines with issue references already removed
    pub lines: Vec<String>,
    /// Referenced issue numbers, deduplicated, in order of appearance
    pub issues: Vec<u32>,
    /// Identifier inherited from the source commit (may be empty)
    pub sha: String,
}

impl Entry {
    fn push_issue(&mut self, n: u32) {
        if !self.issues.contains(&n) {
            self.issues.push(n);
        }
    }

    /// Render the entry into its changelog description.
    ///
    /// Scope becomes a bold prefix, issue references are re-emitted once as
    /// a trailing annotation, and the commit link suffix is added only for
    /// the first entry of a commit with a non-empty identifier.
    fn render(&self, repo_url: &str, with_link: bool) -> String {
        let mut desc = self.lines.join("\n").trim().to_string();

        if let Some(scope) = &self.scope {
            desc = format!("**{}**: {}", scope, desc);
        }

        if !self.issues.is_empty() {
            let refs: Vec<String> = self.issues.iter().map(|n| format!("#{}", n)).collect();
            desc.push_str(&format!(" ({})", refs.join(", ")));
        }

        if with_link && !self.sha.is_empty() && !repo_url.is_empty() {
            let short = &self.sha[..self.sha.len().min(7)];
            desc.push_str(&format!(
                " [`{}`]({}/commit/{})",
                short,
                repo_url.trim_end_matches('/'),
                self.sha
            ));
        }

        desc
    }
}

/// Rendered descriptions grouped by severity, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionBuckets {
    pub major: Vec<String>,
    pub minor: Vec<String>,
    pub patch: Vec<String>,
}

impl SectionBuckets {
    pub fn is_empty(&self) -> bool {
        self.major.is_empty() && self.minor.is_empty() && self.patch.is_empty()
    }
}

/// Grouped changelog input.
///
/// `RawOverride` (the initial-release marker) and ordinary severity buckets
/// are mutually exclusive, so the distinction is carried in the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Buckets {
    /// Verbatim changelog text that bypasses section rendering
    RawOverride(String),
    /// Per-severity description lists
    Sections(SectionBuckets),
}

impl Buckets {
    pub fn is_empty(&self) -> bool {
        match self {
            Buckets::RawOverride(_) => false,
            Buckets::Sections(sections) => sections.is_empty(),
        }
    }
}

/// Outcome of classifying a commit range. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Externally visible bump (already downgraded for unstable versions)
    pub bump: Severity,
    /// `None` iff the bump is `None` and no override path fired
    pub next_version: Option<Version>,
    pub buckets: Buckets,
    /// A prior tag exists but its commit was not found in fetched history:
    /// the tool was adopted on a repository with pre-existing tags
    pub using_in_existing_env: bool,
    /// Cutoff commit identifier, when a prior release tag existed
    pub latest_tag_commit_sha: Option<String>,
}

/// Line-by-line state carried across one commit message.
enum ParseState {
    /// No entry open yet; unrecognized lines are discarded
    Idle,
    /// An entry is accumulating description lines
    Open(Entry),
    /// Inside an ignored block (e.g., `test:`); lines are swallowed
    Skipping,
}

/// Turns raw commit history into severity buckets and the next version.
///
/// Pure over its inputs: history arrives already fetched, the current
/// version and repository URL are passed in explicitly, and no I/O happens
/// here.
pub struct CommitClassifier {
    rules: GrammarRules,
    repo_url: String,
}

impl CommitClassifier {
    /// Create a classifier with the default grammar rules
    pub fn new(repo_url: impl Into<String>) -> Self {
        CommitClassifier {
            rules: GrammarRules::default(),
            repo_url: repo_url.into(),
        }
    }

    /// Create a classifier with custom grammar rules
    pub fn with_rules(repo_url: impl Into<String>, rules: GrammarRules) -> Self {
        CommitClassifier {
            rules,
            repo_url: repo_url.into(),
        }
    }

    /// Classify commits since the last release.
    ///
    /// `commits` is ordered newest first. `cutoff` is the commit identifier
    /// of the latest release tag; `None` means no release has ever been
    /// published, which takes the initial-release path. The commit matching
    /// the cutoff and everything older is excluded.
    pub fn classify(
        &self,
        commits: &[CommitRecord],
        cutoff: Option<&str>,
        current: &Version,
    ) -> ClassificationResult {
        let cutoff = match cutoff {
            Some(sha) => sha,
            None => {
                // First release ever: skip severity classification entirely
                return ClassificationResult {
                    bump: Severity::None,
                    next_version: current.bump(Severity::Patch),
                    buckets: Buckets::RawOverride(INITIAL_RELEASE_NOTE.to_string()),
                    using_in_existing_env: false,
                    latest_tag_commit_sha: None,
                };
            }
        };

        let mut found_cutoff = false;
        let mut eligible: Vec<&CommitRecord> = Vec::new();
        for commit in commits {
            if commit.sha == cutoff {
                found_cutoff = true;
                break;
            }
            eligible.push(commit);
        }

        let mut sections = SectionBuckets::default();
        let mut bump = Severity::None;

        for commit in eligible {
            for (index, entry) in self.parse_message(&commit.message, &commit.sha)
                .into_iter()
                .enumerate()
            {
                bump = bump.max(entry.severity);
                let rendered = entry.render(&self.repo_url, index == 0);
                match entry.severity {
                    Severity::Major => sections.major.push(rendered),
                    Severity::Minor => sections.minor.push(rendered),
                    Severity::Patch => sections.patch.push(rendered),
                    Severity::None => {}
                }
            }
        }

        // Pre-1.0 breaking changes only bump minor; the entries still land
        // in the major bucket above.
        let effective = if bump == Severity::Major && !current.is_stable() {
            Severity::Minor
        } else {
            bump
        };

        ClassificationResult {
            bump: effective,
            next_version: current.bump(effective),
            buckets: Buckets::Sections(sections),
            using_in_existing_env: !found_cutoff,
            latest_tag_commit_sha: Some(cutoff.to_string()),
        }
    }

    /// Extract all entries from one commit message.
    ///
    /// Runs the line state machine: an entry-start line opens an entry,
    /// `BREAKING` escalates the open entry to major, continuation lines
    /// append to it, an ignored-type line swallows its block, and anything
    /// arriving with no entry open is discarded.
    pub fn parse_message(&self, message: &str, sha: &str) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut state = ParseState::Idle;

        for raw in message.lines() {
            match self.rules.classify_line(raw) {
                LineKind::EntryStart {
                    severity,
                    scope,
                    text,
                } => {
                    flush(&mut state, &mut entries);
                    let (clean, refs) = self.rules.extract_issue_refs(&text);
                    let mut entry = Entry {
                        severity,
                        scope,
                        lines: Vec::new(),
                        issues: Vec::new(),
                        sha: sha.to_string(),
                    };
                    if !clean.is_empty() {
                        entry.lines.push(clean);
                    }
                    for n in refs {
                        entry.push_issue(n);
                    }
                    state = ParseState::Open(entry);
                }
                LineKind::IgnoredStart => {
                    flush(&mut state, &mut entries);
                    state = ParseState::Skipping;
                }
                LineKind::Breaking { text } => {
                    if let ParseState::Open(entry) = &mut state {
                        entry.severity = Severity::Major;
                        if let Some(text) = text {
                            let (clean, refs) = self.rules.extract_issue_refs(&text);
                            if !clean.is_empty() {
                                entry.lines.push(clean);
                            }
                            for n in refs {
                                entry.push_issue(n);
                            }
                        }
                    }
                }
                LineKind::Plain => {
                    if let ParseState::Open(entry) = &mut state {
                        let (clean, refs) = self.rules.extract_issue_refs(raw.trim());
                        entry.lines.push(clean);
                        for n in refs {
                            entry.push_issue(n);
                        }
                    }
                }
            }
        }

        flush(&mut state, &mut entries);
        entries
    }
}

fn flush(state: &mut ParseState, entries: &mut Vec<Entry>) {
    if let ParseState::Open(entry) = std::mem::replace(state, ParseState::Idle) {
        entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CommitClassifier {
        CommitClassifier::new("https://github.com/acme/widget")
    }

    fn stable() -> Version {
        Version::new(1, 4, 2)
    }

    #[test]
    fn test_single_feat_commit() {
        let commits = vec![
            CommitRecord::new("aaa1111", "feat: add dark mode"),
            CommitRecord::new("tagsha", "fix: old release work"),
        ];
        let result = classifier().classify(&commits, Some("tagsha"), &stable());

        assert_eq!(result.bump, Severity::Minor);
        assert_eq!(result.next_version, Some(Version::new(1, 5, 0)));
        match &result.buckets {
            Buckets::Sections(sections) => {
                assert_eq!(sections.minor.len(), 1);
                assert!(sections.minor[0].starts_with("add dark mode"));
                assert!(sections.major.is_empty());
                assert!(sections.patch.is_empty());
            }
            Buckets::RawOverride(_) => panic!("unexpected raw override"),
        }
    }

    #[test]
    fn test_breaking_marker_escalates_open_entry() {
        let commits = vec![CommitRecord::new(
            "bbb2222",
            "fix: rework storage\nBREAKING: the cache file moved",
        )];
        let result = classifier().classify(&commits, Some("missing"), &stable());

        assert_eq!(result.bump, Severity::Major);
        assert_eq!(result.next_version, Some(Version::new(2, 0, 0)));
        match &result.buckets {
            Buckets::Sections(sections) => {
                assert_eq!(sections.major.len(), 1);
                assert!(sections.major[0].contains("rework storage"));
                assert!(sections.major[0].contains("the cache file moved"));
            }
            Buckets::RawOverride(_) => panic!("unexpected raw override"),
        }
    }

    #[test]
    fn test_unstable_major_downgrades_bump_but_not_bucket() {
        let commits = vec![CommitRecord::new(
            "ccc3333",
            "feat: new api\nBREAKING: old api removed",
        )];
        let unstable = Version::new(0, 0, 7);
        let result = classifier().classify(&commits, Some("missing"), &unstable);

        assert_eq!(result.bump, Severity::Minor);
        assert_eq!(result.next_version, Some(Version::new(0, 1, 0)));
        match &result.buckets {
            Buckets::Sections(sections) => {
                assert_eq!(sections.major.len(), 1);
                assert!(sections.minor.is_empty());
            }
            Buckets::RawOverride(_) => panic!("unexpected raw override"),
        }
    }

    #[test]
    fn test_no_qualifying_commits() {
        let commits = vec![
            CommitRecord::new("ddd4444", "docs: update readme"),
            CommitRecord::new("eee5555", "chore: bump deps"),
        ];
        let result = classifier().classify(&commits, Some("missing"), &stable());

        assert_eq!(result.bump, Severity::None);
        assert_eq!(result.next_version, None);
        assert!(result.buckets.is_empty());
    }

    #[test]
    fn test_cutoff_excludes_tagged_commit_and_older() {
        let commits = vec![
            CommitRecord::new("new1", "fix: current cycle"),
            CommitRecord::new("tagsha", "feat: already released"),
            CommitRecord::new("old1", "feat: ancient history"),
        ];
        let result = classifier().classify(&commits, Some("tagsha"), &stable());

        assert_eq!(result.bump, Severity::Patch);
        assert!(!result.using_in_existing_env);
        match &result.buckets {
            Buckets::Sections(sections) => {
                assert!(sections.minor.is_empty());
                assert_eq!(sections.patch.len(), 1);
            }
            Buckets::RawOverride(_) => panic!("unexpected raw override"),
        }
    }

    #[test]
    fn test_missing_cutoff_flags_existing_env() {
        let commits = vec![CommitRecord::new("fff6666", "fix: something")];
        let result = classifier().classify(&commits, Some("not-in-history"), &stable());

        assert!(result.using_in_existing_env);
        assert_eq!(result.bump, Severity::Patch);
        assert_eq!(
            result.latest_tag_commit_sha,
            Some("not-in-history".to_string())
        );
    }

    #[test]
    fn test_initial_release_path() {
        let commits = vec![CommitRecord::new("aaa", "feat: everything")];
        let current = Version::new(0, 0, 0);
        let result = classifier().classify(&commits, None, &current);

        assert_eq!(result.bump, Severity::None);
        assert_eq!(result.next_version, Some(Version::new(0, 0, 1)));
        assert!(!result.using_in_existing_env);
        assert_eq!(result.latest_tag_commit_sha, None);
        assert_eq!(
            result.buckets,
            Buckets::RawOverride(INITIAL_RELEASE_NOTE.to_string())
        );
    }

    #[test]
    fn test_multi_entry_commit_links_first_entry_only() {
        let commits = vec![CommitRecord::new(
            "0123456789abcdef",
            "feat: first thing\nfix: second thing",
        )];
        let result = classifier().classify(&commits, Some("missing"), &stable());

        match &result.buckets {
            Buckets::Sections(sections) => {
                assert!(sections.minor[0].contains(
                    "[`0123456`](https://github.com/acme/widget/commit/0123456789abcdef)"
                ));
                assert!(!sections.patch[0].contains("commit/"));
            }
            Buckets::RawOverride(_) => panic!("unexpected raw override"),
        }
    }

    #[test]
    fn test_empty_identifier_gets_no_link() {
        let commits = vec![CommitRecord::new("", "feat: unsourced change")];
        let result = classifier().classify(&commits, Some("missing"), &stable());

        match &result.buckets {
            Buckets::Sections(sections) => {
                assert_eq!(sections.minor[0], "unsourced change");
            }
            Buckets::RawOverride(_) => panic!("unexpected raw override"),
        }
    }

    #[test]
    fn test_scope_renders_bold_prefix() {
        let classifier = CommitClassifier::new("");
        let entries = classifier.parse_message("feat(button): text", "");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].render("", false), "**button**: text");
    }

    #[test]
    fn test_issue_refs_merged_and_deduplicated() {
        let classifier = CommitClassifier::new("");
        let entries = classifier.parse_message(
            "fix: patch the leak (#33343)\nmore detail, closes #33343 and closes #77",
            "",
        );
        assert_eq!(entries.len(), 1);
        let rendered = entries[0].render("", false);
        assert!(rendered.ends_with("(#33343, #77)"));
        assert_eq!(rendered.matches("#33343").count(), 1);
    }

    #[test]
    fn test_continuation_lines_preserved() {
        let classifier = CommitClassifier::new("");
        let entries =
            classifier.parse_message("fix: first line\nsecond line\n\nthird paragraph", "");
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].render("", false),
            "first line\nsecond line\n\nthird paragraph"
        );
    }

    #[test]
    fn test_leading_noise_discarded() {
        let classifier = CommitClassifier::new("");
        let entries =
            classifier.parse_message("WIP free text subject\nfix: the real change", "");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].render("", false), "the real change");
    }

    #[test]
    fn test_test_block_cut_off_from_description() {
        let classifier = CommitClassifier::new("");
        let entries = classifier.parse_message(
            "fix: stop the flicker\nextra context line\ntest: added a regression check\nwith a body that explains it",
            "",
        );
        assert_eq!(entries.len(), 1);
        let rendered = entries[0].render("", false);
        assert!(rendered.contains("extra context line"));
        assert!(!rendered.contains("regression check"));
        assert!(!rendered.contains("explains it"));
    }

    #[test]
    fn test_breaking_without_open_entry_ignored() {
        let classifier = CommitClassifier::new("");
        let entries = classifier.parse_message("BREAKING: floating marker", "");
        assert!(entries.is_empty());
    }
}
