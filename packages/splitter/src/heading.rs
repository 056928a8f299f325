//! Heading rules and boundary detection.
//!
//! A [`HeadingRule`] decides which lines of a document start a new section
//! and what label that section gets. Rules are plain data so that every book
//! is described by a profile entry instead of its own program.

use regex::Regex;

use crate::error::{Result, SplitterError};
use crate::labels::LabelKind;

/// How heading lines are recognized.
#[derive(Debug, Clone)]
pub enum HeadingPattern {
    /// Regular expression applied to each trimmed line.
    ///
    /// The label is the named group `label` if present, otherwise capture
    /// group 1, otherwise the whole trimmed line.
    Regex(Regex),

    /// Fixed titles matched verbatim, in order, first occurrence of each.
    Titles(Vec<String>),
}

impl HeadingPattern {
    /// Short description used in logs and errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Regex(re) => re.as_str().to_string(),
            Self::Titles(titles) => format!("{} fixed titles", titles.len()),
        }
    }
}

/// A section boundary found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// Zero-based line index of the heading.
    pub line: usize,
    /// Raw label extracted from the heading.
    pub label: String,
    /// Numeric value of the label (positional for verbatim labels).
    pub value: u32,
}

/// Declarative description of one book's heading convention.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    /// Pattern that recognizes heading lines.
    pub pattern: HeadingPattern,

    /// How extracted labels convert to numbers.
    pub label_kind: LabelKind,

    /// First line to scan; skips tables of contents.
    pub start_offset: usize,

    /// Stop after the boundary whose value reaches this; larger values are skipped.
    pub max_label: Option<u32>,

    /// Exclusive end of the scanned document (trailing material without a heading).
    pub end_line: Option<usize>,

    /// Whether the first section is pulled back to line 0.
    pub includes_preamble: bool,

    /// Label for a section made of everything before the first heading.
    pub leading_section: Option<String>,

    /// Match the regex against untrimmed lines, so indented table of
    /// contents entries are not taken for headings.
    pub match_raw: bool,

    /// Lines matching this are never headings, even when the pattern matches.
    pub exclude: Option<Regex>,
}

impl HeadingRule {
    /// Create a rule from a regular expression.
    pub fn regex(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| SplitterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(HeadingPattern::Regex(re)))
    }

    /// Create a rule from a fixed list of titles.
    #[must_use]
    pub fn titles(titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(HeadingPattern::Titles(
            titles.into_iter().map(Into::into).collect(),
        ))
        .with_label_kind(LabelKind::Verbatim)
    }

    /// Create a rule with default settings around a pattern.
    #[must_use]
    pub fn new(pattern: HeadingPattern) -> Self {
        Self {
            pattern,
            label_kind: LabelKind::Arabic,
            start_offset: 0,
            max_label: None,
            end_line: None,
            includes_preamble: true,
            leading_section: None,
            match_raw: false,
            exclude: None,
        }
    }

    /// Set the label kind.
    #[must_use]
    pub fn with_label_kind(mut self, kind: LabelKind) -> Self {
        self.label_kind = kind;
        self
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

    /// Set the exclusive end line of the scanned document.
    #[must_use]
    pub fn with_end_line(mut self, end: usize) -> Self {
        self.end_line = Some(end);
        self
    }

    /// Set whether the first section includes the preamble.
    #[must_use]
    pub fn with_preamble(mut self, includes: bool) -> Self {
        self.includes_preamble = includes;
        self
    }

    /// Emit content before the first heading as its own section.
    #[must_use]
    pub fn with_leading_section(mut self, label: impl Into<String>) -> Self {
        self.leading_section = Some(label.into());
        self
    }

    /// Match headings against untrimmed lines.
    #[must_use]
    pub fn with_raw_match(mut self, raw: bool) -> Self {
        self.match_raw = raw;
        self
    }

    /// Reject heading candidates that match `pattern`.
    pub fn with_exclude(mut self, pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| SplitterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.exclude = Some(re);
        Ok(self)
    }

    /// Exclusive end of the document as seen by this rule.
    #[must_use]
    pub fn scan_end(&self, doc_len: usize) -> usize {
        self.end_line.map_or(doc_len, |end| end.min(doc_len))
    }

    /// Extract a label if the line is a heading under a regex pattern.
    fn match_regex<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
        let caps = re.captures(line)?;
        let label = caps
            .name("label")
            .or_else(|| caps.get(1))
            .map_or(line, |m| m.as_str());
        Some(label.trim())
    }
}

/// Find the section boundaries of a document under a rule.
///
/// # Errors
/// Returns [`SplitterError::NoHeadingsFound`] when nothing matches,
/// [`SplitterError::MissingTitles`] when a title list is incomplete, and
/// [`SplitterError::InvalidLabel`] when a numeric label does not parse.
pub fn find_boundaries(doc: &[String], rule: &HeadingRule) -> Result<Vec<Boundary>> {
    let end = rule.scan_end(doc.len());
    let start = rule.start_offset.min(end);

    let mut boundaries = match &rule.pattern {
        HeadingPattern::Regex(re) => scan_regex(doc, start, end, re, rule)?,
        HeadingPattern::Titles(titles) => scan_titles(doc, start, end, titles, rule)?,
    };

    if boundaries.is_empty() {
        return Err(SplitterError::NoHeadingsFound {
            pattern: rule.pattern.describe(),
            start_offset: rule.start_offset,
        });
    }

    if let Some(label) = &rule.leading_section {
        if boundaries[0].line > 0 {
            boundaries.insert(
                0,
                Boundary {
                    line: 0,
                    label: label.clone(),
                    value: 0,
                },
            );
            if !rule.label_kind.is_numeric() {
                renumber_positionally(&mut boundaries);
            }
        }
    }

    tracing::info!(
        count = boundaries.len(),
        pattern = %rule.pattern.describe(),
        "Found section boundaries"
    );

    Ok(boundaries)
}

fn scan_regex(
    doc: &[String],
    start: usize,
    end: usize,
    re: &Regex,
    rule: &HeadingRule,
) -> Result<Vec<Boundary>> {
    let mut boundaries: Vec<Boundary> = Vec::new();

    for (line, text) in doc.iter().enumerate().take(end).skip(start) {
        let candidate = if rule.match_raw { text.as_str() } else { text.trim() };
        let Some(label) = HeadingRule::match_regex(re, candidate) else {
            continue;
        };
        if rule.exclude.as_ref().is_some_and(|ex| ex.is_match(candidate)) {
            tracing::debug!(line, label, "Skipping excluded heading");
            continue;
        }

        let value = label_value(label, boundaries.len(), rule.label_kind)?;

        if let Some(max) = rule.max_label {
            if value > max {
                tracing::debug!(line, label, value, max, "Skipping heading above max label");
                continue;
            }
        }

        tracing::debug!(line, label, value, "Heading");
        boundaries.push(Boundary {
            line,
            label: label.to_string(),
            value,
        });

        if rule.max_label == Some(value) {
            break;
        }
    }

    Ok(boundaries)
}

fn scan_titles(
    doc: &[String],
    start: usize,
    end: usize,
    titles: &[String],
    rule: &HeadingRule,
) -> Result<Vec<Boundary>> {
    let mut boundaries: Vec<Boundary> = Vec::new();
    let mut next = titles.iter().peekable();

    for (line, text) in doc.iter().enumerate().take(end).skip(start) {
        let Some(title) = next.peek() else {
            break;
        };
        if text.trim() != title.as_str() {
            continue;
        }

        let value = label_value(title, boundaries.len(), rule.label_kind)?;
        tracing::debug!(line, title = %title, value, "Title heading");
        boundaries.push(Boundary {
            line,
            label: (*title).clone(),
            value,
        });
        next.next();

        if rule.max_label == Some(value) {
            break;
        }
    }

    if let Some(missing) = next.next() {
        if !boundaries.is_empty() && rule.max_label.is_none() {
            return Err(SplitterError::MissingTitles {
                found: boundaries.len(),
                expected: titles.len(),
                missing: missing.clone(),
            });
        }
    }

    Ok(boundaries)
}

/// Numeric value of a label; verbatim labels count from 1 in order found.
fn label_value(label: &str, found_so_far: usize, kind: LabelKind) -> Result<u32> {
    if kind.is_numeric() {
        kind.parse(label)
    } else {
        Ok(u32::try_from(found_so_far + 1).unwrap_or(u32::MAX))
    }
}

fn renumber_positionally(boundaries: &mut [Boundary]) {
    for (i, boundary) in boundaries.iter_mut().enumerate() {
        boundary.value = u32::try_from(i + 1).unwrap_or(u32::MAX);
    }
}
