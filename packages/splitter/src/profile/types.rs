//! Types for book profiles.

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::discovery::{compile_filename_pattern, IndexScheme};
use crate::error::{Result, SplitterError};
use crate::heading::HeadingRule;
use crate::labels::LabelKind;
use crate::splitter::{OutputLayout, OutputNamer};

/// Bibliographic data sent to the content store when a book is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub edition: String,
    #[serde(default)]
    pub summary: String,
}

/// Template for chapter titles shown in the store, e.g. `"Book {label}"`.
///
/// Supports the `{label}` and `{index}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterTitle(pub String);

impl ChapterTitle {
    /// Create a title template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Format the title for a chapter.
    ///
    /// # Examples
    /// ```
    /// use alexandria_splitter::profile::ChapterTitle;
    ///
    /// assert_eq!(ChapterTitle::default().format("IV", 4), "Chapter IV");
    /// assert_eq!(ChapterTitle::new("Lesson {index}").format("4", 4), "Lesson 4");
    /// ```
    #[must_use]
    pub fn format(&self, label: &str, index: u32) -> String {
        self.0
            .replace("{label}", label)
            .replace("{index}", &index.to_string())
    }
}

impl Default for ChapterTitle {
    fn default() -> Self {
        Self::new("Chapter {label}")
    }
}

fn default_true() -> bool {
    true
}

/// Serializable heading rule.
///
/// Exactly one of `pattern` and `titles` must be set. Without an explicit
/// `label_kind`, title lists are verbatim and patterns are arabic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadingSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_kind: Option<LabelKind>,

    #[serde(default)]
    pub start_offset: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_label: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,

    #[serde(default = "default_true")]
    pub includes_preamble: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leading_section: Option<String>,

    #[serde(default)]
    pub match_raw: bool,

    /// Lines matching this regex are never headings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

impl HeadingSpec {
    /// Create a spec around a regular expression.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, kind: LabelKind) -> Self {
        Self {
            pattern: Some(pattern.into()),
            titles: Vec::new(),
            label_kind: Some(kind),
            start_offset: 0,
            max_label: None,
            end_line: None,
            includes_preamble: true,
            leading_section: None,
            match_raw: false,
            exclude: None,
        }
    }

    /// Create a spec around a fixed title list.
    #[must_use]
    pub fn titles(titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            pattern: None,
            titles: titles.into_iter().map(Into::into).collect(),
            label_kind: None,
            ..Self::pattern("", LabelKind::Verbatim)
        }
    }

    /// Label kind in effect.
    #[must_use]
    pub fn kind(&self) -> LabelKind {
        self.label_kind.unwrap_or(if self.titles.is_empty() {
            LabelKind::Arabic
        } else {
            LabelKind::Verbatim
        })
    }

    /// Set the start-search offset.
    #[must_use]
    pub fn with_start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }

    /// Set the maximum label value.
    #[must_use]
    pub fn with_max_label(mut self, max: u32) -> Self {
        self.max_label = Some(max);
        self
    }

    /// Set the exclusive end line.
    #[must_use]
    pub fn with_end_line(mut self, end: usize) -> Self {
        self.end_line = Some(end);
        self
    }

    /// Set whether the first chapter carries the front matter.
    #[must_use]
    pub fn with_preamble(mut self, includes: bool) -> Self {
        self.includes_preamble = includes;
        self
    }

    /// Never treat lines matching `pattern` as headings.
    #[must_use]
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    /// Set the label of a leading front-matter section.
    #[must_use]
    pub fn with_leading_section(mut self, label: impl Into<String>) -> Self {
        self.leading_section = Some(label.into());
        self
    }

    /// Match headings against untrimmed lines.
    #[must_use]
    pub fn with_raw_match(mut self) -> Self {
        self.match_raw = true;
        self
    }

    /// Compile into a [`HeadingRule`].
    pub fn to_rule(&self, key: &str) -> Result<HeadingRule> {
        let kind = self.kind();
        let base = match (&self.pattern, self.titles.is_empty()) {
            (Some(pattern), true) => HeadingRule::regex(pattern)?.with_label_kind(kind),
            (None, false) => HeadingRule::titles(self.titles.iter().cloned()).with_label_kind(kind),
            (Some(_), false) => {
                return Err(SplitterError::InvalidProfile {
                    key: key.to_string(),
                    reason: "heading has both a pattern and titles".to_string(),
                })
            }
            (None, true) => {
                return Err(SplitterError::InvalidProfile {
                    key: key.to_string(),
                    reason: "heading needs a pattern or titles".to_string(),
                })
            }
        };

        let mut rule = base
            .with_start_offset(self.start_offset)
            .with_preamble(self.includes_preamble)
            .with_raw_match(self.match_raw);
        if let Some(max) = self.max_label {
            rule = rule.with_max_label(max);
        }
        if let Some(end) = self.end_line {
            rule = rule.with_end_line(end);
        }
        if let Some(label) = &self.leading_section {
            // A leading section has no number of its own
            if kind.is_numeric() {
                return Err(SplitterError::InvalidProfile {
                    key: key.to_string(),
                    reason: format!("leading_section needs verbatim labels, not {kind}"),
                });
            }
            rule = rule.with_leading_section(label.clone());
        }
        if let Some(pattern) = &self.exclude {
            rule = rule.with_exclude(pattern)?;
        }
        Ok(rule)
    }
}

/// Where and how split chapters are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSpec {
    /// File name template with `{label}` and/or `{index}`.
    pub template: String,

    #[serde(default)]
    pub layout: OutputLayout,
}

/// How split chapters are found again for ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverySpec {
    /// File name regex with exactly one capture group for the label.
    pub pattern: String,

    #[serde(flatten)]
    pub scheme: IndexScheme,
}

/// Everything needed to split, discover, and ingest one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookProfile {
    /// Short identifier used on the command line.
    pub key: String,

    pub book: BookMetadata,

    pub heading: HeadingSpec,

    pub output: OutputSpec,

    pub discovery: DiscoverySpec,

    #[serde(default)]
    pub chapter_title: ChapterTitle,
}

impl BookProfile {
    /// Compile the heading rule.
    pub fn heading_rule(&self) -> Result<HeadingRule> {
        self.heading.to_rule(&self.key)
    }

    /// Compile the discovery filename pattern.
    pub fn filename_pattern(&self) -> Result<Regex> {
        compile_filename_pattern(&self.discovery.pattern)
    }

    /// Output namer for a directory.
    #[must_use]
    pub fn namer(&self, directory: impl Into<PathBuf>) -> OutputNamer {
        OutputNamer::new(directory, self.output.template.clone())
    }

    /// Check that every pattern in the profile compiles.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(SplitterError::InvalidProfile {
                key: self.key.clone(),
                reason: "empty key".to_string(),
            });
        }
        if !self.output.template.contains("{label}") && !self.output.template.contains("{index}")
        {
            return Err(SplitterError::InvalidProfile {
                key: self.key.clone(),
                reason: format!(
                    "output template '{}' has no {{label}} or {{index}} placeholder",
                    self.output.template
                ),
            });
        }
        self.heading_rule()?;
        self.filename_pattern()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BookProfile {
        BookProfile {
            key: "odyssey".to_string(),
            book: BookMetadata {
                title: "The Odyssey".to_string(),
                author: "Homer".to_string(),
                ..BookMetadata::default()
            },
            heading: HeadingSpec::pattern(r"^BOOK\s+([IVXLCDM]+)$", LabelKind::Roman),
            output: OutputSpec {
                template: "Odyssey_Chapter_{label}.txt".to_string(),
                layout: OutputLayout::Paragraphs,
            },
            discovery: DiscoverySpec {
                pattern: r"^Odyssey_Chapter_([IVXLCDM]+)\.txt$".to_string(),
                scheme: IndexScheme::new(LabelKind::Roman),
            },
            chapter_title: ChapterTitle::new("Book {label}"),
        }
    }

    #[test]
    fn test_profile_validates() {
        assert!(profile().validate().is_ok());
    }

    #[test]
    fn test_template_needs_placeholder() {
        let mut p = profile();
        p.output.template = "Odyssey.txt".to_string();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_heading_spec_needs_exactly_one_source() {
        let mut spec = HeadingSpec::pattern(r"^X$", LabelKind::Roman);
        spec.titles = vec!["A".to_string()];
        assert!(spec.to_rule("k").is_err());

        spec.pattern = None;
        spec.titles.clear();
        assert!(spec.to_rule("k").is_err());
    }

    #[test]
    fn test_heading_spec_to_rule_carries_settings() {
        let spec = HeadingSpec::pattern(r"^([IVXLCDM]+)$", LabelKind::Roman)
            .with_start_offset(100)
            .with_max_label(39)
            .with_end_line(5750);

        let rule = spec.to_rule("awakening").unwrap();

        assert_eq!(rule.start_offset, 100);
        assert_eq!(rule.max_label, Some(39));
        assert_eq!(rule.end_line, Some(5750));
        assert!(rule.includes_preamble);
        assert_eq!(rule.label_kind, LabelKind::Roman);
    }

    #[test]
    fn test_chapter_title_format() {
        assert_eq!(profile().chapter_title.format("IX", 9), "Book IX");
    }

    #[test]
    fn test_profile_from_yaml() {
        let yaml = r#"
key: gatsby
book:
  title: The Great Gatsby
  author: F. Scott Fitzgerald
  genre: Novel
heading:
  pattern: '^Chapter ([IVX]+)$'
  label_kind: roman
output:
  template: 'Gatsby_Chapter_{label}.txt'
discovery:
  pattern: '^Gatsby_Chapter_([IVX]+)\.txt$'
  kind: roman
"#;
        let p: BookProfile = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(p.book.title, "The Great Gatsby");
        assert_eq!(p.book.edition, "");
        assert!(p.heading.includes_preamble);
        assert_eq!(p.output.layout, OutputLayout::Paragraphs);
        assert_eq!(p.discovery.scheme.kind, LabelKind::Roman);
        assert_eq!(p.chapter_title, ChapterTitle::default());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_title_list_from_yaml_defaults_to_verbatim() {
        let yaml = r#"
key: tales
book:
  title: Two Tales
  author: Nobody
heading:
  titles: ["FIRST TALE", "SECOND TALE"]
output:
  template: 'Tales_Section_{index}.txt'
discovery:
  pattern: '^Tales_Section_(\d+)\.txt$'
"#;
        let p: BookProfile = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(p.heading.label_kind, None);
        assert_eq!(p.heading.kind(), LabelKind::Verbatim);
        assert!(p.validate().is_ok());

        let lines: Vec<String> = ["FIRST TALE", "once", "SECOND TALE", "twice"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let boundaries = crate::heading::find_boundaries(&lines, &p.heading_rule().unwrap())
            .unwrap();
        let values: Vec<_> = boundaries.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_pattern_without_kind_is_arabic() {
        let mut spec = HeadingSpec::pattern(r"^DAY (\d+)$", LabelKind::Roman);
        spec.label_kind = None;
        assert_eq!(spec.kind(), LabelKind::Arabic);
    }

    #[test]
    fn test_leading_section_rejects_numeric_labels() {
        let mut p = profile();
        p.heading = p.heading.with_leading_section("FRONT MATTER");

        let err = p.validate().unwrap_err();

        assert!(err.to_string().contains("leading_section"));

        p.heading.label_kind = Some(LabelKind::Verbatim);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_exclude_pattern_is_compiled() {
        let spec = HeadingSpec::pattern(r"^Chapter", LabelKind::Verbatim).with_exclude("(unclosed");
        assert!(matches!(
            spec.to_rule("k").unwrap_err(),
            SplitterError::InvalidPattern { .. }
        ));
    }
}
