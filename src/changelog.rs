//! Renders classified buckets into a grouped markdown changelog.

use crate::classifier::Buckets;

/// Section headings, in the fixed rendering order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headings {
    pub breaking: String,
    pub features: String,
    pub fixes: String,
}

impl Default for Headings {
    fn default() -> Self {
        Headings {
            breaking: "BREAKING CHANGES".to_string(),
            features: "New Features".to_string(),
            fixes: "Bug Fixes".to_string(),
        }
    }
}

/// Rendering options: headings plus an optional package-name title line
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub headings: Headings,
    pub package: Option<String>,
}

/// Turns severity buckets into one flat changelog string.
pub struct ChangelogRenderer {
    options: RenderOptions,
}

impl ChangelogRenderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        ChangelogRenderer { options }
    }

    /// Render the changelog.
    ///
    /// A raw override is emitted verbatim and bypasses section rendering.
    /// Otherwise sections appear in fixed priority order (breaking, then
    /// features, then fixes); empty buckets produce no heading at all.
    pub fn render(&self, buckets: &Buckets) -> String {
        let sections = match buckets {
            Buckets::RawOverride(text) => return text.clone(),
            Buckets::Sections(sections) => sections,
        };

        let mut out = String::new();

        if let Some(package) = &self.options.package {
            out.push_str(&format!("## {}\n\n", package));
        }

        let ordered = [
            (&self.options.headings.breaking, &sections.major),
            (&self.options.headings.features, &sections.minor),
            (&self.options.headings.fixes, &sections.patch),
        ];

        for (heading, entries) in ordered {
            if entries.is_empty() {
                continue;
            }
            out.push_str(&format!("### {}\n\n", heading));
            for entry in entries {
                // Multi-line descriptions keep their internal line breaks;
                // only the first line gets a list marker
                out.push_str(&format!("- {}\n", entry));
            }
            out.push('\n');
        }

        out.trim_end().to_string()
    }
}
