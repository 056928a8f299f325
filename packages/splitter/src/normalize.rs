//! Paragraph normalization.
//!
//! Source texts wrap paragraphs over many lines. The normalizer joins each
//! run of non-blank lines into one line and keeps a single blank line between
//! paragraphs.

/// Collapse wrapped lines into one line per paragraph.
///
/// Each line is trimmed. A blank line ends the current paragraph, which is
/// emitted followed by one blank separator line. Runs of blank lines produce
/// a single separator and blank lines before the first paragraph produce
/// nothing, so the function is idempotent.
///
/// # Examples
/// ```
/// use alexandria_splitter::normalize::normalize;
///
/// let lines = ["It was a bright", "  cold day in April.", "", "", "The clocks"];
/// assert_eq!(
///     normalize(lines),
///     vec!["It was a bright cold day in April.", "", "The clocks"]
/// );
/// ```
pub fn normalize<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = Vec::new();
    let mut current = String::new();

    for line in lines {
        let trimmed = line.as_ref().trim();

        if trimmed.is_empty() {
            if !current.is_empty() {
                output.push(std::mem::take(&mut current));
                output.push(String::new());
            }
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(trimmed);
    }

    if !current.is_empty() {
        output.push(current);
    }

    output
}

/// Normalized paragraphs without blank separator lines.
pub fn paragraphs<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    normalize(lines)
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect()
}
