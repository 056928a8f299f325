//! End-to-end tests: split a book, discover its chapters, ingest them.

use std::fs;
use std::path::Path;

use alexandria_ingest::{ingest_profile, BookStatus, IngestError, MemoryStore};
use alexandria_splitter::{split_book, BookProfile, ProfileRegistry, SplitterError};
use pretty_assertions::assert_eq;

fn words(prefix: &str, lines: std::ops::RangeInclusive<usize>) -> String {
    lines
        .map(|n| format!("{prefix} {n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A 50-line book with chapter headings at lines 0 and 25.
fn write_book(path: &Path) {
    let mut lines = Vec::new();
    lines.push("CHAPTER 1. A".to_string());
    lines.push(String::new());
    lines.extend((2..=11).map(|n| format!("alpha {n}")));
    lines.push(String::new());
    lines.extend((13..=24).map(|n| format!("beta {n}")));
    lines.push("CHAPTER 2. B".to_string());
    lines.push(String::new());
    lines.extend((27..=49).map(|n| format!("gamma {n}")));
    assert_eq!(lines.len(), 50);
    fs::write(path, lines.join("\n")).unwrap();
}

fn profile() -> BookProfile {
    let registry = ProfileRegistry::with_builtins().unwrap();
    let mut profile = registry.get("mobydick").unwrap().clone();
    profile.heading.start_offset = 0;
    profile
}

fn split_into(dir: &Path) -> BookProfile {
    let input = dir.join("book.txt");
    write_book(&input);
    let out = dir.join("chapters");
    fs::create_dir(&out).unwrap();
    let profile = profile();
    split_book(&profile, &input, &out, None).unwrap();
    profile
}

#[test]
fn test_split_discover_ingest() {
    let dir = tempfile::tempdir().unwrap();
    let profile = split_into(dir.path());
    let store = MemoryStore::new();

    let report = ingest_profile(&profile, &dir.path().join("chapters"), 1, &store).unwrap();

    assert_eq!(report.book, BookStatus::Created);
    assert_eq!(report.uploaded, vec![1, 2]);

    let content_calls: Vec<_> = store
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("set_chapter_content"))
        .collect();
    assert_eq!(content_calls, vec!["set_chapter_content 1", "set_chapter_content 2"]);

    let book = store.book("Moby-Dick; or, The Whale").unwrap();
    assert_eq!(book.chapter_names, vec!["Chapter 1", "Chapter 2"]);
    assert_eq!(
        book.chapters[&1].paragraphs,
        vec![
            "CHAPTER 1. A".to_string(),
            words("alpha", 2..=11),
            words("beta", 13..=24),
        ]
    );
    assert_eq!(
        book.chapters[&2].paragraphs,
        vec!["CHAPTER 2. B".to_string(), words("gamma", 27..=49)]
    );
}

#[test]
fn test_second_run_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let profile = split_into(dir.path());
    let chapters = dir.path().join("chapters");
    let store = MemoryStore::new().hiding_existing_books();

    let first = ingest_profile(&profile, &chapters, 1, &store).unwrap();
    let second = ingest_profile(&profile, &chapters, 1, &store).unwrap();

    assert_eq!(first.book, BookStatus::Created);
    assert_eq!(second.book, BookStatus::AlreadyExisted);
    assert_eq!(second.uploaded, vec![1, 2]);
    let book = store.book("Moby-Dick; or, The Whale").unwrap();
    assert_eq!(book.chapters.len(), 2);
}

#[test]
fn test_resume_from_min_index() {
    let dir = tempfile::tempdir().unwrap();
    let profile = split_into(dir.path());
    let store = MemoryStore::new();

    let report = ingest_profile(&profile, &dir.path().join("chapters"), 2, &store).unwrap();

    assert_eq!(report.uploaded, vec![2]);
}

#[test]
fn test_no_chapters_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new();

    let err = ingest_profile(&profile(), dir.path(), 1, &store).unwrap_err();

    assert!(matches!(
        err,
        IngestError::Splitter(SplitterError::NoChaptersFound { .. })
    ));
    assert!(store.calls().is_empty());
}
