use crate::error::{CiReleaseError, Result};
use std::fmt;

/// Magnitude of version change implied by a set of commits.
///
/// Totally ordered: `None < Patch < Minor < Major`. The overall bump for a
/// release is the maximum severity across all classified entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::None => "none",
            Severity::Patch => "patch",
            Severity::Minor => "minor",
            Severity::Major => "major",
        };
        write!(f, "{}", s)
    }
}

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a string (e.g., "v1.2.3" or "1.2.3" -> Version(1,2,3))
    pub fn parse(input: &str) -> Result<Self> {
        // Remove 'v' or 'V' prefix
        let clean = input.trim_start_matches('v').trim_start_matches('V');

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(CiReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                input
            )));
        }

        let major = parts[0].parse::<u32>().map_err(|_| {
            CiReleaseError::version(format!("Invalid major version: {}", parts[0]))
        })?;
        let minor = parts[1].parse::<u32>().map_err(|_| {
            CiReleaseError::version(format!("Invalid minor version: {}", parts[1]))
        })?;
        let patch = parts[2].parse::<u32>().map_err(|_| {
            CiReleaseError::version(format!("Invalid patch version: {}", parts[2]))
        })?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Whether this version is considered stable (major >= 1).
    ///
    /// Pre-1.0 versions downgrade breaking changes to a minor bump.
    pub fn is_stable(&self) -> bool {
        self.major >= 1
    }

    /// Compute the next version for a severity.
    ///
    /// Major resets minor and patch, minor resets patch, patch increments.
    /// `Severity::None` never advances and yields `None`.
    pub fn bump(&self, severity: Severity) -> Option<Self> {
        match severity {
            Severity::Major => Some(Version {
                major: self.major + 1,
                minor: 0,
                patch: 0,
            }),
            Severity::Minor => Some(Version {
                major: self.major,
                minor: self.minor + 1,
                patch: 0,
            }),
            Severity::Patch => Some(Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch + 1,
            }),
            Severity::None => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_without_v() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_uppercase_v() {
        let v = Version::parse("V1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("v1.2.3.4").is_err());
        assert!(Version::parse("next").is_err());
    }

    #[test]
    fn test_version_bump_major() {
        let v = Version::new(1, 0, 9);
        assert_eq!(v.bump(Severity::Major), Some(Version::new(2, 0, 0)));
    }

    #[test]
    fn test_version_bump_minor() {
        let v = Version::new(1, 0, 9);
        assert_eq!(v.bump(Severity::Minor), Some(Version::new(1, 1, 0)));
    }

    #[test]
    fn test_version_bump_patch_carries_double_digits() {
        let v = Version::new(0, 0, 9);
        assert_eq!(v.bump(Severity::Patch), Some(Version::new(0, 0, 10)));
    }

    #[test]
    fn test_version_bump_none_never_advances() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(Severity::None), None);
    }

    #[test]
    fn test_version_stability() {
        assert!(Version::new(1, 0, 0).is_stable());
        assert!(!Version::new(0, 9, 9).is_stable());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Major > Severity::Minor);
        assert!(Severity::Minor > Severity::Patch);
        assert!(Severity::Patch > Severity::None);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Major.to_string(), "major");
        assert_eq!(Severity::None.to_string(), "none");
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
    }
}
