//! Commit message line grammar.
//!
//! Each line of a commit message is classified into a tagged kind (entry
//! start, breaking marker, ignored-block start, or plain text) which the
//! classifier's state machine consumes. Keeping the grammar separate from the
//! state machine keeps both testable in isolation.

use crate::domain::Severity;
use regex::Regex;

/// Effect a recognized commit type has on the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// The type contributes a severity bucket (e.g., feat, fix)
    Bump(Severity),
    /// The type opens a block excluded from the changelog (e.g., test)
    Ignore,
}

/// Classified form of one commit message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A `type(scope)?: description` line with a recognized bump type
    EntryStart {
        severity: Severity,
        scope: Option<String>,
        text: String,
    },
    /// Start of a block that is excluded from descriptions entirely
    IgnoredStart,
    /// A `BREAKING` marker line, optionally carrying body text
    Breaking { text: Option<String> },
    /// Anything else: continuation of an open entry, or discardable noise
    Plain,
}

/// Compiled line grammar rules.
///
/// The set of ignored types is configurable; which keywords delimit an
/// excluded block is a content filter, not parsing logic, so it is not
/// hardcoded here.
pub struct GrammarRules {
    entry_re: Regex,
    bracket_re: Regex,
    breaking_re: Regex,
    trailing_refs_re: Regex,
    inline_ref_re: Regex,
    ignored_types: Vec<String>,
}

impl GrammarRules {
    /// Build the grammar with the given list of ignored (non-severity) types
    pub fn new(ignored_types: Vec<String>) -> Self {
        GrammarRules {
            entry_re: Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!)?:\s*(.*)$")
                .expect("entry pattern is valid"),
            bracket_re: Regex::new(r"^\[[^\]]+\]\s*").expect("bracket pattern is valid"),
            breaking_re: Regex::new(r"^BREAKING(?:[ -]CHANGE)?(?::(.*))?$")
                .expect("breaking pattern is valid"),
            trailing_refs_re: Regex::new(r"\s*\((#\d+(?:\s*,\s*#\d+)*)\)$")
                .expect("trailing refs pattern is valid"),
            inline_ref_re: Regex::new(r"(?i)\s*(?:closes|fixes)\s+#(\d+)")
                .expect("inline ref pattern is valid"),
            ignored_types,
        }
    }

    /// Look up the effect of a commit type.
    ///
    /// Fixed table with an explicit no-match variant: `feat` maps to a minor
    /// bump, `fix` to a patch bump, configured ignored types to an excluded
    /// block, anything else is not an entry start at all.
    pub fn type_rule(&self, commit_type: &str) -> Option<TypeRule> {
        if self.ignored_types.iter().any(|t| t == commit_type) {
            return Some(TypeRule::Ignore);
        }
        match commit_type {
            "feat" => Some(TypeRule::Bump(Severity::Minor)),
            "fix" => Some(TypeRule::Bump(Severity::Patch)),
            _ => None,
        }
    }

    /// Classify a single message line.
    ///
    /// A leading bracketed tag (e.g., `[publish]`) is stripped before entry
    /// recognition. A `!` after the type escalates the entry to major, same
    /// as a later `BREAKING` marker would.
    pub fn classify_line(&self, line: &str) -> LineKind {
        let trimmed = line.trim();

        if let Some(caps) = self.breaking_re.captures(trimmed) {
            let text = caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .filter(|t| !t.is_empty());
            return LineKind::Breaking { text };
        }

        let stripped = self.bracket_re.replace(trimmed, "");
        if let Some(caps) = self.entry_re.captures(&stripped) {
            match self.type_rule(&caps[1]) {
                Some(TypeRule::Bump(severity)) => {
                    let severity = if caps.get(3).is_some() {
                        Severity::Major
                    } else {
                        severity
                    };
                    return LineKind::EntryStart {
                        severity,
                        scope: caps.get(2).map(|m| m.as_str().to_string()),
                        text: caps[4].to_string(),
                    };
                }
                Some(TypeRule::Ignore) => return LineKind::IgnoredStart,
                None => {}
            }
        }

        LineKind::Plain
    }

    /// Extract issue references from a line and remove them from the text.
    ///
    /// Recognizes a trailing parenthesized list like `(#12, #34)` and inline
    /// `closes #N` / `fixes #N` phrases. Returns the cleaned text plus the
    /// referenced issue numbers in order of appearance.
    pub fn extract_issue_refs(&self, line: &str) -> (String, Vec<u32>) {
        let mut refs = Vec::new();
        let mut text = line.to_string();

        if let Some(found) = self.trailing_refs_re.captures(&text) {
            let range = found.get(0).map(|m| m.range());
            for piece in found[1].split(',') {
                if let Ok(n) = piece.trim().trim_start_matches('#').parse::<u32>() {
                    refs.push(n);
                }
            }
            if let Some(range) = range {
                text.replace_range(range, "");
            }
        }

        while let Some(found) = self.inline_ref_re.captures(&text) {
            let range = match found.get(0) {
                Some(m) => m.range(),
                None => break,
            };
            if let Ok(n) = found[1].parse::<u32>() {
                refs.push(n);
            }
            text.replace_range(range, "");
        }

        // Removing an inline phrase can leave a dangling comma behind
        let cleaned = text.trim_end().trim_end_matches(',').trim_end();
        (cleaned.to_string(), refs)
    }
}

impl Default for GrammarRules {
    fn default() -> Self {
        GrammarRules::new(vec!["test".to_string()])
    }
}
