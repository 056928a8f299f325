//! Content store contract.
//!
//! The store that finally holds the library is an external collaborator. This
//! module only fixes the shape of the calls ingestion makes and their answers.

use std::collections::BTreeMap;
use std::sync::Mutex;

use alexandria_splitter::BookMetadata;

use crate::error::StoreError;

/// Result of a single store call.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Operations ingestion needs from the content store.
///
/// Implementations answer [`StoreError::AlreadyExists`] when a book with the
/// same title is created twice.
pub trait ContentStore {
    /// Whether a book with this title exists.
    fn get_book(&self, title: &str) -> StoreResult<bool>;

    /// Create a book record.
    fn create_book(&self, book: &BookMetadata) -> StoreResult<()>;

    /// Register a chapter title for a book.
    fn set_chapter_name(&self, book_title: &str, chapter_title: &str) -> StoreResult<()>;

    /// Store a chapter's paragraphs at a position.
    fn set_chapter_content(
        &self,
        book_title: &str,
        chapter_title: &str,
        index: u32,
        paragraphs: &[String],
    ) -> StoreResult<()>;
}

/// A chapter as held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredChapter {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// A book as held by [`MemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredBook {
    pub metadata: BookMetadata,
    /// Registered chapter titles, in call order.
    pub chapter_names: Vec<String>,
    /// Chapter content by index; a second write to an index replaces the first.
    pub chapters: BTreeMap<u32, StoredChapter>,
}

#[derive(Default)]
struct MemoryState {
    books: BTreeMap<String, StoredBook>,
    calls: Vec<String>,
    fail_on_index: Option<u32>,
    fail_on_name: Option<String>,
    hide_existing: bool,
}

/// In-memory content store for dry runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject content for this chapter index.
    #[must_use]
    pub fn failing_on_index(self, index: u32) -> Self {
        self.with_state(|s| s.fail_on_index = Some(index));
        self
    }

    /// Reject registration of this chapter title.
    #[must_use]
    pub fn failing_on_chapter_name(self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.with_state(|s| s.fail_on_name = Some(title));
        self
    }

    /// Report every book as missing from `get_book`, so creation is always
    /// attempted and duplicates surface as [`StoreError::AlreadyExists`].
    #[must_use]
    pub fn hiding_existing_books(self) -> Self {
        self.with_state(|s| s.hide_existing = true);
        self
    }

    /// Snapshot of a stored book.
    #[must_use]
    pub fn book(&self, title: &str) -> Option<StoredBook> {
        self.with_state(|s| s.books.get(title).cloned())
    }

    /// Names of the store calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
        // State stays consistent across a panicking caller
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }
}

impl ContentStore for MemoryStore {
    fn get_book(&self, title: &str) -> StoreResult<bool> {
        self.with_state(|s| {
            s.calls.push(format!("get_book {title}"));
            Ok(!s.hide_existing && s.books.contains_key(title))
        })
    }

    fn create_book(&self, book: &BookMetadata) -> StoreResult<()> {
        self.with_state(|s| {
            s.calls.push(format!("create_book {}", book.title));
            if s.books.contains_key(&book.title) {
                return Err(StoreError::AlreadyExists(book.title.clone()));
            }
            s.books.insert(
                book.title.clone(),
                StoredBook {
                    metadata: book.clone(),
                    ..StoredBook::default()
                },
            );
            Ok(())
        })
    }

    fn set_chapter_name(&self, book_title: &str, chapter_title: &str) -> StoreResult<()> {
        self.with_state(|s| {
            s.calls.push(format!("set_chapter_name {chapter_title}"));
            if s.fail_on_name.as_deref() == Some(chapter_title) {
                return Err(StoreError::Rejected(format!("chapter name {chapter_title}")));
            }
            let book = s
                .books
                .get_mut(book_title)
                .ok_or_else(|| StoreError::NotFound(book_title.to_string()))?;
            book.chapter_names.push(chapter_title.to_string());
            Ok(())
        })
    }

    fn set_chapter_content(
        &self,
        book_title: &str,
        chapter_title: &str,
        index: u32,
        paragraphs: &[String],
    ) -> StoreResult<()> {
        self.with_state(|s| {
            s.calls.push(format!("set_chapter_content {index}"));
            if s.fail_on_index == Some(index) {
                return Err(StoreError::Rejected(format!("chapter {index}")));
            }
            let book = s
                .books
                .get_mut(book_title)
                .ok_or_else(|| StoreError::NotFound(book_title.to_string()))?;
            book.chapters.insert(
                index,
                StoredChapter {
                    title: chapter_title.to_string(),
                    paragraphs: paragraphs.to_vec(),
                },
            );
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: &str) -> BookMetadata {
        BookMetadata {
            title: title.to_string(),
            author: "Homer".to_string(),
            ..BookMetadata::default()
        }
    }

    #[test]
    fn test_create_book_twice_is_already_exists() {
        let store = MemoryStore::new();
        store.create_book(&metadata("The Odyssey")).unwrap();

        let err = store.create_book(&metadata("The Odyssey")).unwrap_err();

        assert_eq!(err, StoreError::AlreadyExists("The Odyssey".to_string()));
        assert!(store.get_book("The Odyssey").unwrap());
    }

    #[test]
    fn test_chapter_for_unknown_book() {
        let store = MemoryStore::new();
        let err = store.set_chapter_name("Missing", "Chapter I").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_content_overwrites_index() {
        let store = MemoryStore::new();
        store.create_book(&metadata("The Odyssey")).unwrap();
        store
            .set_chapter_content("The Odyssey", "Book I", 1, &["old".to_string()])
            .unwrap();
        store
            .set_chapter_content("The Odyssey", "Book I", 1, &["new".to_string()])
            .unwrap();

        let book = store.book("The Odyssey").unwrap();
        assert_eq!(book.chapters.len(), 1);
        assert_eq!(book.chapters[&1].paragraphs, vec!["new".to_string()]);
    }

    #[test]
    fn test_hiding_existing_books() {
        let store = MemoryStore::new().hiding_existing_books();
        store.create_book(&metadata("The Odyssey")).unwrap();
        assert!(!store.get_book("The Odyssey").unwrap());
    }
}
