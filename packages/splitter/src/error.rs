//! Error types for the splitter.
//!
//! Every failure here is fatal to the run that raised it. The splitter is an
//! offline batch job and is rerun from scratch, so errors carry enough context
//! (paths, line numbers, patterns) to fix the input or the profile.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// No heading rule matched anywhere in the scanned document.
    #[error("No headings found (pattern: {pattern}, scanned from line {start_offset})")]
    NoHeadingsFound { pattern: String, start_offset: usize },

    /// A title list rule did not find every title.
    #[error("Found {found} of {expected} titles; first missing: '{missing}'")]
    MissingTitles {
        found: usize,
        expected: usize,
        missing: String,
    },

    /// A label could not be converted to a number.
    #[error("Invalid {kind} label: '{label}'")]
    InvalidLabel { label: String, kind: String },

    /// A filename or heading pattern is malformed.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Discovery found no chapter files in the directory.
    #[error("No chapter files matching '{pattern}' in {}", .directory.display())]
    NoChaptersFound { directory: PathBuf, pattern: String },

    /// Two discovered chapter files resolve to the same index.
    #[error("Chapter index {index} is claimed by both {} and {}", .first.display(), .second.display())]
    DuplicateIndex {
        index: u32,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two sections of one split would be written to the same file.
    #[error("Sections '{first}' and '{second}' both map to {}", .path.display())]
    DuplicateOutput {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// No profile registered under the given key.
    #[error("Unknown book profile: '{0}'")]
    UnknownProfile(String),

    /// A profile entry is internally inconsistent.
    #[error("Invalid profile '{key}': {reason}")]
    InvalidProfile { key: String, reason: String },

    /// IO error with the path that caused it.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile YAML could not be parsed.
    #[error("Profile YAML parsing failed: {0}")]
    ProfileParse(#[from] serde_yaml_ng::Error),
}

impl SplitterError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
