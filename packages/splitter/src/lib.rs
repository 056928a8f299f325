//! Alexandria chapter splitter - Segment book texts into chapter files.
//!
//! This crate turns a plain-text book into one file per chapter and finds
//! those files again, in reading order, for ingestion into the library.
//!
//! # Example
//!
//! ```
//! use alexandria_splitter::{roman, LabelKind};
//!
//! assert_eq!(roman::to_int("XIV"), 14);
//! assert_eq!(LabelKind::Roman.parse("XII").unwrap(), 12);
//! ```
//!
//! # Architecture
//!
//! - [`roman`]: Roman numeral conversion
//! - [`labels`]: Chapter label kinds and parsing
//! - [`heading`]: Heading rules and boundary detection
//! - [`normalize`]: Paragraph normalization
//! - [`splitter`]: Sections and chapter file output
//! - [`discovery`]: Finding chapter files on disk
//! - [`profile`]: Per-book configuration and the built-in table
//! - [`job`]: Profile-driven split and discovery
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod discovery;
pub mod error;
pub mod heading;
pub mod job;
pub mod labels;
pub mod normalize;
pub mod profile;
pub mod roman;
pub mod splitter;

// Re-export main functions
pub use job::{discover_chapters, format_chapters, format_file, split_book};

// Re-export commonly used items
pub use discovery::{discover, ChapterFile, IndexScheme};
pub use error::{Result, SplitterError};
pub use heading::{find_boundaries, Boundary, HeadingRule};
pub use labels::LabelKind;
pub use normalize::{normalize, paragraphs};
pub use profile::{BookMetadata, BookProfile, ChapterTitle, ProfileRegistry};
pub use splitter::{plan_outputs, split, OutputLayout, OutputNamer, Section, WrittenSection};
