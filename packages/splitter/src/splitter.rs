//! Section splitting and chapter file output.
//!
//! Turns the boundaries found by [`crate::heading`] into contiguous sections,
//! renders each section according to an [`OutputLayout`], and writes one file
//! per section.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitterError};
use crate::heading::{find_boundaries, Boundary, HeadingRule};
use crate::normalize::{normalize, paragraphs};

/// How section text is written to its chapter file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// One paragraph per line, blank separator lines kept.
    #[default]
    Paragraphs,
    /// One paragraph per line, no blank lines.
    Compact,
    /// Source lines copied unchanged.
    Verbatim,
}

/// A contiguous line range of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Raw label from the heading.
    pub label: String,
    /// Numeric value of the label.
    pub value: u32,
    /// First line, inclusive.
    pub start_line: usize,
    /// Last line, exclusive.
    pub end_line: usize,
    /// Whether `start_line` was pulled back to 0 to carry front matter.
    pub includes_preamble: bool,
}

impl Section {
    /// Number of source lines in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_line - self.start_line
    }

    /// Whether the section has no source lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end_line == self.start_line
    }
}

/// Builds output file paths from a template.
///
/// The template may contain `{label}` (sanitized for file names) and
/// `{index}` (the label's numeric value).
#[derive(Debug, Clone)]
pub struct OutputNamer {
    directory: PathBuf,
    template: String,
}

impl OutputNamer {
    /// Create a namer writing into `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, template: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            template: template.into(),
        }
    }

    /// Output directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path for a section's chapter file.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use alexandria_splitter::splitter::{OutputNamer, Section};
    ///
    /// let namer = OutputNamer::new("books", "Sherlock_Adventure_{label}.txt");
    /// let section = Section {
    ///     label: "IV".to_string(),
    ///     value: 4,
    ///     start_line: 0,
    ///     end_line: 10,
    ///     includes_preamble: false,
    /// };
    /// assert_eq!(namer.path_for(&section), Path::new("books/Sherlock_Adventure_IV.txt"));
    /// ```
    #[must_use]
    pub fn path_for(&self, section: &Section) -> PathBuf {
        let name = self
            .template
            .replace("{label}", &sanitize_label(&section.label))
            .replace("{index}", &section.value.to_string());
        self.directory.join(name)
    }
}

/// Make a label safe for use in a file name.
///
/// Whitespace becomes `_`; anything other than alphanumerics, `-`, `_` and
/// `.` is dropped.
///
/// # Examples
/// ```
/// use alexandria_splitter::splitter::sanitize_label;
///
/// assert_eq!(sanitize_label("THE LAST"), "THE_LAST");
/// assert_eq!(sanitize_label("../etc"), "..etc");
/// ```
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// A section that has been written to disk.
#[derive(Debug, Clone)]
pub struct WrittenSection {
    pub section: Section,
    pub path: PathBuf,
    /// Number of lines written.
    pub lines: usize,
}

/// Read a document as lines.
///
/// Strips a UTF-8 byte order mark and accepts `\r\n` line endings. Bytes that
/// are not valid UTF-8 are replaced with U+FFFD.
pub fn read_document(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| SplitterError::io(path, e))?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                offset = e.utf8_error().valid_up_to(),
                "Input is not valid UTF-8, replacing invalid bytes"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    Ok(content.lines().map(str::to_string).collect())
}

/// Build sections from boundaries.
///
/// Each section ends where the next one starts; the last ends at the scan end
/// of the rule. When the rule includes the preamble and the first section is
/// the book's first chapter (value 1, or any first section for verbatim
/// labels) it starts at line 0.
#[must_use]
pub fn sections(doc_len: usize, boundaries: &[Boundary], rule: &HeadingRule) -> Vec<Section> {
    let end = rule.scan_end(doc_len);

    boundaries
        .iter()
        .enumerate()
        .map(|(i, boundary)| {
            let end_line = boundaries.get(i + 1).map_or(end, |next| next.line);
            let is_first =
                i == 0 && (!rule.label_kind.is_numeric() || boundary.value == 1);
            let includes_preamble = rule.includes_preamble && is_first && boundary.line > 0;

            Section {
                label: boundary.label.clone(),
                value: boundary.value,
                start_line: if includes_preamble { 0 } else { boundary.line },
                end_line,
                includes_preamble,
            }
        })
        .collect()
}

/// Render a section's lines for output.
#[must_use]
pub fn render(doc: &[String], section: &Section, layout: OutputLayout) -> Vec<String> {
    let lines = &doc[section.start_line..section.end_line];
    match layout {
        OutputLayout::Paragraphs => normalize(lines),
        OutputLayout::Compact => paragraphs(lines),
        OutputLayout::Verbatim => lines.to_vec(),
    }
}

/// Write lines to a file, one per line, replacing any existing file.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| SplitterError::io(path, e))
}

/// Pair each section with its output path.
///
/// # Errors
/// Returns [`SplitterError::DuplicateOutput`] when two sections map to the
/// same file, before anything is written.
pub fn plan_outputs(
    sections: Vec<Section>,
    namer: &OutputNamer,
) -> Result<Vec<(Section, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();
    let mut planned = Vec::with_capacity(sections.len());

    for section in sections {
        let path = namer.path_for(&section);
        if let Some(first) = claimed.insert(path.clone(), section.label.clone()) {
            return Err(SplitterError::DuplicateOutput {
                path,
                first,
                second: section.label,
            });
        }
        planned.push((section, path));
    }

    Ok(planned)
}

/// Split a document into chapter files.
///
/// Output paths are checked for collisions before the first write. Stops at
/// the first failed write; files already written stay on disk.
pub fn split(
    doc: &[String],
    rule: &HeadingRule,
    namer: &OutputNamer,
    layout: OutputLayout,
) -> Result<Vec<WrittenSection>> {
    let boundaries = find_boundaries(doc, rule)?;
    let planned = plan_outputs(sections(doc.len(), &boundaries, rule), namer)?;
    let mut written = Vec::with_capacity(planned.len());

    for (section, path) in planned {
        let lines = render(doc, &section, layout);
        write_lines(&path, &lines)?;

        tracing::debug!(
            label = %section.label,
            index = section.value,
            start = section.start_line,
            end = section.end_line,
            lines = lines.len(),
            path = %path.display(),
            "Wrote section"
        );

        written.push(WrittenSection {
            lines: lines.len(),
            section,
            path,
        });
    }

    tracing::info!(
        sections = written.len(),
        directory = %namer.directory().display(),
        "Split complete"
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelKind;
    use pretty_assertions::assert_eq;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| (*s).to_string()).collect()
    }

    fn roman_rule() -> HeadingRule {
        HeadingRule::regex(r"^([IVXLCDM]+)$")
            .unwrap()
            .with_label_kind(LabelKind::Roman)
    }

    fn boundary(line: usize, label: &str, value: u32) -> Boundary {
        Boundary {
            line,
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn test_sections_are_contiguous() {
        let rule = roman_rule().with_preamble(false);
        let boundaries = vec![boundary(2, "I", 1), boundary(5, "II", 2), boundary(9, "III", 3)];

        let sections = sections(12, &boundaries, &rule);

        let ranges: Vec<_> = sections.iter().map(|s| (s.start_line, s.end_line)).collect();
        assert_eq!(ranges, vec![(2, 5), (5, 9), (9, 12)]);
    }

    #[test]
    fn test_preamble_pulls_first_section_to_zero() {
        let rule = roman_rule();
        let boundaries = vec![boundary(1600, "I", 1), boundary(1700, "II", 2)];

        let sections = sections(1800, &boundaries, &rule);

        assert_eq!(sections[0].start_line, 0);
        assert!(sections[0].includes_preamble);
        assert_eq!(sections[1].start_line, 1700);
        assert!(!sections[1].includes_preamble);
    }

    #[test]
    fn test_preamble_only_for_first_chapter() {
        // Resumed split where the first boundary is not chapter 1
        let rule = roman_rule();
        let boundaries = vec![boundary(40, "V", 5), boundary(80, "VI", 6)];

        let sections = sections(100, &boundaries, &rule);

        assert_eq!(sections[0].start_line, 40);
        assert!(!sections[0].includes_preamble);
    }

    #[test]
    fn test_last_section_respects_end_line() {
        let rule = roman_rule().with_end_line(50);
        let boundaries = vec![boundary(0, "I", 1), boundary(20, "II", 2)];

        let sections = sections(100, &boundaries, &rule);

        assert_eq!(sections[1].end_line, 50);
    }

    #[test]
    fn test_render_layouts() {
        let lines = doc(&["I", "", "wrapped", "line", "", "", "next"]);
        let section = Section {
            label: "I".to_string(),
            value: 1,
            start_line: 0,
            end_line: lines.len(),
            includes_preamble: false,
        };

        assert_eq!(
            render(&lines, &section, OutputLayout::Paragraphs),
            vec!["I", "", "wrapped line", "", "next"]
        );
        assert_eq!(
            render(&lines, &section, OutputLayout::Compact),
            vec!["I", "wrapped line", "next"]
        );
        assert_eq!(render(&lines, &section, OutputLayout::Verbatim), lines);
    }

    #[test]
    fn test_split_writes_one_file_per_section() {
        let dir = tempfile::tempdir().unwrap();
        let lines = doc(&["Preface", "", "I", "", "one", "two", "", "II", "", "three"]);
        let namer = OutputNamer::new(dir.path(), "Book_Chapter_{label}.txt");

        let written = split(&lines, &roman_rule(), &namer, OutputLayout::Paragraphs).unwrap();

        assert_eq!(written.len(), 2);
        let first = fs::read_to_string(dir.path().join("Book_Chapter_I.txt")).unwrap();
        assert_eq!(first, "Preface\n\nI\n\none two\n\n");
        let second = fs::read_to_string(dir.path().join("Book_Chapter_II.txt")).unwrap();
        assert_eq!(second, "II\n\nthree\n");
    }

    #[test]
    fn test_split_replaces_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Book_Chapter_I.txt");
        fs::write(&target, "stale content that is much longer than the new one").unwrap();
        let namer = OutputNamer::new(dir.path(), "Book_Chapter_{label}.txt");

        split(&doc(&["I", "fresh"]), &roman_rule(), &namer, OutputLayout::Compact).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "I fresh\n");
    }

    #[test]
    fn test_split_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let namer = OutputNamer::new(dir.path().join("missing"), "{label}.txt");

        let err = split(&doc(&["I", "x"]), &roman_rule(), &namer, OutputLayout::Compact)
            .unwrap_err();

        assert!(matches!(err, SplitterError::Io { .. }));
    }

    #[test]
    fn test_namer_index_placeholder() {
        let namer = OutputNamer::new("out", "Stories_Section_{index}.txt");
        let section = Section {
            label: "AN HONEST THIEF".to_string(),
            value: 1,
            start_line: 0,
            end_line: 1,
            includes_preamble: true,
        };
        assert_eq!(
            namer.path_for(&section),
            Path::new("out/Stories_Section_1.txt")
        );
    }

    #[test]
    fn test_split_rejects_repeated_output_name() {
        let dir = tempfile::tempdir().unwrap();
        let lines = doc(&["I", "first part one", "II", "part two", "I", "second part one"]);
        let namer = OutputNamer::new(dir.path(), "Book_Chapter_{label}.txt");

        let err = split(&lines, &roman_rule(), &namer, OutputLayout::Verbatim).unwrap_err();

        match err {
            SplitterError::DuplicateOutput { path, first, second } => {
                assert_eq!(path, dir.path().join("Book_Chapter_I.txt"));
                assert_eq!(first, "I");
                assert_eq!(second, "I");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing is written when the plan collides
        assert!(!dir.path().join("Book_Chapter_I.txt").exists());
        assert!(!dir.path().join("Book_Chapter_II.txt").exists());
    }

    #[test]
    fn test_plan_outputs_catches_sanitized_collisions() {
        let namer = OutputNamer::new("out", "Book_{label}.txt");
        let section = |label: &str, value| Section {
            label: label.to_string(),
            value,
            start_line: 0,
            end_line: 1,
            includes_preamble: false,
        };

        let err = plan_outputs(vec![section("THE END", 1), section("THE END?", 2)], &namer)
            .unwrap_err();

        assert!(matches!(err, SplitterError::DuplicateOutput { .. }));
    }

    #[test]
    fn test_read_document_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        // "Café" in Latin-1
        fs::write(&path, b"Caf\xe9\n\nI\n").unwrap();

        let lines = read_document(&path).unwrap();

        assert_eq!(lines, vec!["Caf\u{fffd}", "", "I"]);
    }

    #[test]
    fn test_read_document_strips_bom_and_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.txt");
        fs::write(&path, "\u{feff}Title\r\n\r\nI\r\n").unwrap();

        let lines = read_document(&path).unwrap();

        assert_eq!(lines, vec!["Title", "", "I"]);
    }
}
