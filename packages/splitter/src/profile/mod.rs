//! Book profiles.
//!
//! A profile bundles everything the pipeline needs to know about one book:
//! its metadata for the content store, how its headings look, how chapter
//! files are named, and how they are found again for ingestion.

mod builtin;
mod registry;
mod types;

pub use builtin::{builtin_profiles, STORIES_TITLES};
pub use registry::ProfileRegistry;
pub use types::{BookMetadata, BookProfile, ChapterTitle, DiscoverySpec, HeadingSpec, OutputSpec};
