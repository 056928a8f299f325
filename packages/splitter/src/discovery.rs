//! Discovery of previously split chapter files.
//!
//! The filesystem is the only record of what the splitter produced, so the
//! chapter list is rebuilt from a directory listing on every run.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitterError};
use crate::labels::LabelKind;

/// A chapter file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFile {
    pub path: PathBuf,
    /// Label captured from the file name.
    pub label: String,
    /// Ordering value derived from the label.
    pub index: u32,
}

/// How discovered labels become chapter indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexScheme {
    /// Conversion for numbered labels.
    #[serde(default)]
    pub kind: LabelKind,

    /// Unnumbered labels that sort after every numbered chapter, in this order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing_labels: Vec<String>,
}

impl IndexScheme {
    /// Create a scheme with no trailing labels.
    #[must_use]
    pub fn new(kind: LabelKind) -> Self {
        Self {
            kind,
            trailing_labels: Vec::new(),
        }
    }

    /// Add unnumbered labels that sort last.
    #[must_use]
    pub fn with_trailing_labels(
        mut self,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.trailing_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    fn trailing_position(&self, label: &str) -> Option<usize> {
        self.trailing_labels.iter().position(|t| t == label)
    }
}

/// Compile a filename pattern, requiring exactly one capture group.
///
/// # Examples
/// ```
/// use alexandria_splitter::discovery::compile_filename_pattern;
///
/// assert!(compile_filename_pattern(r"^Count_V1_Chapter_(\d+)\.txt$").is_ok());
/// assert!(compile_filename_pattern(r"^Count_V1_Chapter_\d+\.txt$").is_err());
/// ```
pub fn compile_filename_pattern(pattern: &str) -> Result<Regex> {
    let re = Regex::new(pattern).map_err(|e| SplitterError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    check_single_group(&re)?;
    Ok(re)
}

fn check_single_group(re: &Regex) -> Result<()> {
    // captures_len counts the implicit whole-match group
    let groups = re.captures_len() - 1;
    if groups == 1 {
        Ok(())
    } else {
        Err(SplitterError::InvalidPattern {
            pattern: re.as_str().to_string(),
            reason: format!("expected exactly one capture group, found {groups}"),
        })
    }
}

/// Discover chapter files in a directory, ordered by index.
///
/// Entries whose index is below `min_index` are dropped so an interrupted
/// ingestion can resume.
///
/// # Errors
/// - [`SplitterError::InvalidPattern`] if the pattern does not have exactly one group
/// - [`SplitterError::NoChaptersFound`] if no file name matches
/// - [`SplitterError::InvalidLabel`] if a label is neither numbered nor trailing
/// - [`SplitterError::DuplicateIndex`] if two files share an index
pub fn discover(
    directory: &Path,
    pattern: &Regex,
    scheme: &IndexScheme,
    min_index: u32,
) -> Result<Vec<ChapterFile>> {
    check_single_group(pattern)?;

    let mut numbered: Vec<ChapterFile> = Vec::new();
    let mut trailing: Vec<(usize, PathBuf, String)> = Vec::new();

    let entries = fs::read_dir(directory).map_err(|e| SplitterError::io(directory, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| SplitterError::io(directory, e))?;
        let path = entry.path();

        let file_type = entry.file_type().map_err(|e| SplitterError::io(&path, e))?;
        if file_type.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::debug!(path = %path.display(), "Skipping non UTF-8 file name");
            continue;
        };

        let Some(label) = pattern
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
        else {
            continue;
        };

        if let Some(position) = scheme.trailing_position(&label) {
            trailing.push((position, path, label));
            continue;
        }

        let index = scheme.kind.parse(&label)?;
        numbered.push(ChapterFile { path, label, index });
    }

    if numbered.is_empty() && trailing.is_empty() {
        return Err(SplitterError::NoChaptersFound {
            directory: directory.to_path_buf(),
            pattern: pattern.as_str().to_string(),
        });
    }

    let max_numbered = numbered.iter().map(|c| c.index).max().unwrap_or(0);
    for (position, path, label) in trailing {
        let offset = u32::try_from(position).unwrap_or(u32::MAX);
        let index = max_numbered.saturating_add(1).saturating_add(offset);
        tracing::warn!(
            label = %label,
            index,
            path = %path.display(),
            "Unnumbered trailing chapter sorted last"
        );
        numbered.push(ChapterFile { path, label, index });
    }

    let mut chapters = numbered;
    chapters.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)));

    if let Some(pair) = chapters.windows(2).find(|w| w[0].index == w[1].index) {
        return Err(SplitterError::DuplicateIndex {
            index: pair[0].index,
            first: pair[0].path.clone(),
            second: pair[1].path.clone(),
        });
    }

    let total = chapters.len();
    chapters.retain(|c| c.index >= min_index);

    tracing::info!(
        found = total,
        selected = chapters.len(),
        min_index,
        directory = %directory.display(),
        "Discovered chapter files"
    );

    Ok(chapters)
}
