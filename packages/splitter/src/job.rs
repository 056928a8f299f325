//! Profile-driven jobs that tie the components together.

use std::path::Path;

use crate::discovery::{discover, ChapterFile};
use crate::error::Result;
use crate::normalize::normalize;
use crate::profile::BookProfile;
use crate::splitter::{read_document, split, write_lines, OutputLayout, WrittenSection};

/// Split a book's source text into chapter files.
///
/// # Arguments
/// * `profile` - Book profile with the heading rule and output naming
/// * `input` - Source text file
/// * `output_dir` - Existing directory for the chapter files
/// * `layout` - Overrides the profile's output layout when set
pub fn split_book(
    profile: &BookProfile,
    input: &Path,
    output_dir: &Path,
    layout: Option<OutputLayout>,
) -> Result<Vec<WrittenSection>> {
    let rule = profile.heading_rule()?;
    let doc = read_document(input)?;
    let namer = profile.namer(output_dir);
    let layout = layout.unwrap_or(profile.output.layout);

    tracing::info!(
        profile = %profile.key,
        input = %input.display(),
        lines = doc.len(),
        layout = ?layout,
        "Splitting book"
    );

    split(&doc, &rule, &namer, layout)
}

/// Discover a book's chapter files, ordered by index.
pub fn discover_chapters(
    profile: &BookProfile,
    directory: &Path,
    min_index: u32,
) -> Result<Vec<ChapterFile>> {
    let pattern = profile.filename_pattern()?;
    discover(directory, &pattern, &profile.discovery.scheme, min_index)
}

/// Normalize the paragraphs of a text file.
///
/// Writes to `output`, or rewrites `input` when no output is given. Returns
/// the number of lines written.
pub fn format_file(input: &Path, output: Option<&Path>) -> Result<usize> {
    let doc = read_document(input)?;
    let lines = normalize(&doc);
    let target = output.unwrap_or(input);
    write_lines(target, &lines)?;

    tracing::info!(
        input = %input.display(),
        output = %target.display(),
        before = doc.len(),
        after = lines.len(),
        "Formatted text"
    );

    Ok(lines.len())
}

/// Normalize a book's discovered chapter files in place.
///
/// Stops at the first file that cannot be rewritten.
pub fn format_chapters(
    profile: &BookProfile,
    directory: &Path,
    min_index: u32,
) -> Result<Vec<ChapterFile>> {
    let chapters = discover_chapters(profile, directory, min_index)?;
    for chapter in &chapters {
        format_file(&chapter.path, None)?;
    }
    Ok(chapters)
}
