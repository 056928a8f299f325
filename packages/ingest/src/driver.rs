//! Ordered, idempotent ingestion of chapter files into a content store.

use std::fs;
use std::path::Path;

use alexandria_splitter::{discover_chapters, BookMetadata, BookProfile, ChapterFile, ChapterTitle};

use crate::error::{IngestError, Result, StoreError};
use crate::store::ContentStore;

/// How the book record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    /// The store had no book with this title; it was created.
    Created,
    /// The existence probe found the book.
    Existed,
    /// Creation answered `AlreadyExists`.
    AlreadyExisted,
}

/// Outcome of an ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub book: BookStatus,
    /// Chapter indices uploaded, in upload order.
    pub uploaded: Vec<u32>,
}

/// Read a chapter file as paragraphs: trimmed, non-blank lines.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn store_error(operation: &'static str, book: &str, source: StoreError) -> IngestError {
    IngestError::Store {
        operation,
        book: book.to_string(),
        source,
    }
}

/// Make sure the book exists in the store.
fn ensure_book(book: &BookMetadata, store: &impl ContentStore) -> Result<BookStatus> {
    let exists = store
        .get_book(&book.title)
        .map_err(|e| store_error("get_book", &book.title, e))?;
    if exists {
        tracing::info!(title = %book.title, "Book already in store");
        return Ok(BookStatus::Existed);
    }

    match store.create_book(book) {
        Ok(()) => {
            tracing::info!(title = %book.title, author = %book.author, "Created book");
            Ok(BookStatus::Created)
        }
        Err(StoreError::AlreadyExists(_)) => {
            tracing::warn!(title = %book.title, "Book creation reported existing book, continuing");
            Ok(BookStatus::AlreadyExisted)
        }
        Err(e) => Err(store_error("create_book", &book.title, e)),
    }
}

/// Push chapters into the store.
///
/// Creates the book if needed, then uploads every chapter in ascending index
/// order: its title first, then its paragraphs. The first failing store call
/// stops the run; chapters already uploaded stay in the store.
///
/// # Arguments
/// * `book` - Book record to create or reuse
/// * `chapter_title` - Template for chapter titles
/// * `chapters` - Discovered chapter files, in any order
/// * `store` - Target content store
pub fn ingest(
    book: &BookMetadata,
    chapter_title: &ChapterTitle,
    chapters: &[ChapterFile],
    store: &impl ContentStore,
) -> Result<IngestReport> {
    let status = ensure_book(book, store)?;

    let mut ordered: Vec<&ChapterFile> = chapters.iter().collect();
    ordered.sort_by_key(|c| c.index);

    let mut uploaded = Vec::with_capacity(ordered.len());
    for chapter in ordered {
        let paragraphs = read_paragraphs(&chapter.path)?;
        let title = chapter_title.format(&chapter.label, chapter.index);

        store
            .set_chapter_name(&book.title, &title)
            .map_err(|e| store_error("set_chapter_name", &book.title, e))?;
        store
            .set_chapter_content(&book.title, &title, chapter.index, &paragraphs)
            .map_err(|e| store_error("set_chapter_content", &book.title, e))?;

        tracing::info!(
            book = %book.title,
            chapter = %title,
            index = chapter.index,
            paragraphs = paragraphs.len(),
            "Uploaded chapter"
        );
        uploaded.push(chapter.index);
    }

    tracing::info!(book = %book.title, chapters = uploaded.len(), "Ingestion complete");

    Ok(IngestReport {
        book: status,
        uploaded,
    })
}

/// Discover a profile's chapter files and ingest them.
///
/// Chapters below `min_index` are skipped so an interrupted run can resume.
pub fn ingest_profile(
    profile: &BookProfile,
    directory: &Path,
    min_index: u32,
    store: &impl ContentStore,
) -> Result<IngestReport> {
    let chapters = discover_chapters(profile, directory, min_index)?;
    ingest(&profile.book, &profile.chapter_title, &chapters, store)
}
