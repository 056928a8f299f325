//! Alexandria ingest - Push split chapters into the library content store.
//!
//! Chapters found by [`alexandria_splitter::discovery`] are uploaded in index
//! order through the [`store::ContentStore`] contract. Book creation is
//! idempotent, so a run can be repeated or resumed from a chapter index.
//!
//! # Architecture
//!
//! - [`store`]: Content store contract and an in-memory store
//! - [`driver`]: Ingestion driver and chapter reader
//! - [`error`]: Error types and Result alias

pub mod driver;
pub mod error;
pub mod store;

pub use driver::{ingest, ingest_profile, read_paragraphs, BookStatus, IngestReport};
pub use error::{IngestError, Result, StoreError};
pub use store::{ContentStore, MemoryStore};
