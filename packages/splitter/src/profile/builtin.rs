//! Built-in book profiles.
//!
//! One entry per book in the library's Gutenberg collection. Offsets skip the
//! table of contents of the edition the library ships.

use super::types::{BookMetadata, BookProfile, ChapterTitle, DiscoverySpec, HeadingSpec, OutputSpec};
use crate::discovery::IndexScheme;
use crate::labels::LabelKind;
use crate::splitter::OutputLayout;

const ROMAN_GROUP: &str = "([IVXLCDM]+)";
const NUMBER_GROUP: &str = r"(\d+)";
const WORDS_GROUP: &str = "([A-Z]+(?:-[A-Z]+)?)";

/// Story titles of the Dostoevsky collection, in table of contents order.
pub const STORIES_TITLES: [&str; 9] = [
    "AN HONEST THIEF",
    "A NOVEL IN NINE LETTERS",
    "AN UNPLEASANT PREDICAMENT",
    "ANOTHER MAN'S WIFE",
    "THE HEAVENLY CHRISTMAS TREE",
    "THE PEASANT MAREY",
    "THE CROCODILE",
    "BOBOK",
    "THE DREAM OF A RIDICULOUS MAN",
];

fn book(title: &str, author: &str, genre: &str) -> BookMetadata {
    BookMetadata {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        edition: "Project Gutenberg".to_string(),
        summary: String::new(),
    }
}

/// Build a profile whose file names carry the label.
///
/// The discovery pattern is derived from the output template by replacing
/// `{label}` with a group matching the label kind.
fn labelled(
    key: &str,
    metadata: BookMetadata,
    heading: HeadingSpec,
    file_prefix: &str,
    layout: OutputLayout,
) -> BookProfile {
    let kind = heading.kind();
    let group = match kind {
        LabelKind::Roman => ROMAN_GROUP,
        LabelKind::Words => WORDS_GROUP,
        LabelKind::Arabic | LabelKind::Verbatim => NUMBER_GROUP,
    };

    BookProfile {
        key: key.to_string(),
        book: metadata,
        heading,
        output: OutputSpec {
            template: format!("{file_prefix}{{label}}.txt"),
            layout,
        },
        discovery: DiscoverySpec {
            pattern: format!(r"^{file_prefix}{group}\.txt$"),
            scheme: IndexScheme::new(kind),
        },
        chapter_title: ChapterTitle::default(),
    }
}

/// Build a profile whose file names carry the section position.
fn sectioned(
    key: &str,
    metadata: BookMetadata,
    heading: HeadingSpec,
    file_prefix: &str,
    layout: OutputLayout,
) -> BookProfile {
    BookProfile {
        key: key.to_string(),
        book: metadata,
        heading,
        output: OutputSpec {
            template: format!("{file_prefix}{{index}}.txt"),
            layout,
        },
        discovery: DiscoverySpec {
            pattern: format!(r"^{file_prefix}{NUMBER_GROUP}\.txt$"),
            scheme: IndexScheme::new(LabelKind::Arabic),
        },
        chapter_title: ChapterTitle::new("Section {index}"),
    }
}

/// All built-in profiles.
#[must_use]
pub fn builtin_profiles() -> Vec<BookProfile> {
    let roman = |pattern: &str| HeadingSpec::pattern(pattern, LabelKind::Roman);
    let arabic = |pattern: &str| HeadingSpec::pattern(pattern, LabelKind::Arabic);

    let mut sherlock = labelled(
        "sherlock",
        book(
            "The Adventures of Sherlock Holmes",
            "Arthur Conan Doyle",
            "Detective Fiction",
        ),
        roman(r"^([IVXLCDM]+)\.\s+([A-Z][^a-z]+[A-Z])$"),
        "Sherlock_Adventure_",
        OutputLayout::Paragraphs,
    );
    sherlock.chapter_title = ChapterTitle::new("Adventure {label}");

    let mut count = labelled(
        "count",
        book("The Count of Monte Cristo", "Alexandre Dumas", "Adventure"),
        arabic(r"^Chapter\s+(\d+)\.\s+.+$").with_start_offset(168),
        "Count_V1_Chapter_",
        OutputLayout::Paragraphs,
    );
    count.book.edition = "Volume 1".to_string();

    let mut odyssey = labelled(
        "odyssey",
        book("The Odyssey", "Homer", "Epic Poetry"),
        roman(r"^BOOK\s+([IVXLCDM]+)$"),
        "Odyssey_Chapter_",
        OutputLayout::Paragraphs,
    );
    odyssey.chapter_title = ChapterTitle::new("Book {label}");

    let nineteen_eighty_four = |part: &str| {
        let mut metadata = book("Nineteen Eighty-Four", "George Orwell", "Dystopian Fiction");
        if !part.is_empty() {
            metadata.title = format!("{}: {part}", metadata.title);
        }
        metadata
    };

    let mut parts_1984 = labelled(
        "1984-parts",
        nineteen_eighty_four(""),
        HeadingSpec::pattern(r"^PART (?P<label>[A-Z]+)", LabelKind::Words).with_raw_match(),
        "1984_PART_",
        OutputLayout::Verbatim,
    );
    parts_1984.chapter_title = ChapterTitle::new("Part {label}");

    // Parts are split out first; chapters are numbered by position
    let chapter_heading = || {
        HeadingSpec::pattern("^Chapter", LabelKind::Verbatim)
            .with_raw_match()
            .with_preamble(false)
    };
    let mut part_one_1984 = sectioned(
        "1984-part-one",
        nineteen_eighty_four("Part One"),
        chapter_heading(),
        "1984_PART_ONE_Chapter_",
        OutputLayout::Verbatim,
    );
    part_one_1984.chapter_title = ChapterTitle::new("Chapter {index}");
    let mut part_two_1984 = sectioned(
        "1984-part-two",
        nineteen_eighty_four("Part Two"),
        chapter_heading().with_exclude("Ignorance is Strength|War is Peace"),
        "1984_PART_TWO_Chapter_",
        OutputLayout::Verbatim,
    );
    part_two_1984.chapter_title = ChapterTitle::new("Chapter {index}");

    vec![
        sherlock,
        count,
        labelled(
            "awakening",
            book("The Awakening", "Kate Chopin", "Novel"),
            roman(r"^([IVXLCDM]+)$")
                .with_start_offset(100)
                .with_max_label(39)
                .with_end_line(5750),
            "Awakening_Chapter_",
            OutputLayout::Paragraphs,
        ),
        labelled(
            "farewell",
            book("A Farewell to Arms", "Ernest Hemingway", "Novel"),
            roman(r"^CHAPTER\s+([IVXLCDM]+)$").with_start_offset(75),
            "Farewell_Chapter_",
            OutputLayout::Paragraphs,
        ),
        odyssey,
        labelled(
            "scarlet",
            book("The Scarlet Letter", "Nathaniel Hawthorne", "Novel"),
            roman(r"^([IVXLCDM]+)\.$").with_start_offset(1600),
            "Scarlet_Chapter_",
            OutputLayout::Paragraphs,
        ),
        labelled(
            "mobydick",
            book("Moby-Dick; or, The Whale", "Herman Melville", "Novel"),
            arabic(r"^CHAPTER\s+(\d+)\.\s+.+$").with_start_offset(800),
            "MobyDick_Chapter_",
            OutputLayout::Paragraphs,
        ),
        labelled(
            "gatsby",
            book("The Great Gatsby", "F. Scott Fitzgerald", "Novel"),
            roman(r"^Chapter ([IVX]+)$"),
            "Gatsby_Chapter_",
            OutputLayout::Paragraphs,
        ),
        labelled(
            "bravenewworld",
            book("Brave New World", "Aldous Huxley", "Dystopian Fiction"),
            roman(r"^Chapter ([IVX]+)$"),
            "Brave_New_World_Chapter_",
            OutputLayout::Verbatim,
        ),
        sectioned(
            "frankenstein",
            book("Frankenstein; or, The Modern Prometheus", "Mary Shelley", "Gothic Fiction"),
            HeadingSpec::pattern(r"^(?:Letter|Chapter)\s+\d+$", LabelKind::Verbatim)
                .with_start_offset(65),
            "Frankenstein_Section_",
            OutputLayout::Paragraphs,
        ),
        sectioned(
            "stories",
            book("White Nights and Other Stories", "Fyodor Dostoevsky", "Short Stories"),
            HeadingSpec::titles(STORIES_TITLES),
            "Stories_Section_",
            OutputLayout::Verbatim,
        ),
        sectioned(
            "inourtime",
            book("In Our Time", "Ernest Hemingway", "Short Stories"),
            HeadingSpec::pattern(r"^_(?:CHAPTER ([IVXLCDM]+)|L[’']ENVOI)_$", LabelKind::Verbatim)
                .with_leading_section("FRONT MATTER"),
            "InOurTime_Section_",
            OutputLayout::Verbatim,
        ),
        sectioned(
            "death",
            book("Death in the Afternoon", "Ernest Hemingway", "Non-fiction"),
            HeadingSpec::pattern(r"\bCHAPTER ([A-Z]+(?:-[A-Z]+)?)\b", LabelKind::Verbatim),
            "Death_Section_",
            OutputLayout::Verbatim,
        ),
        sectioned(
            "picture",
            book("The Picture of Dorian Gray", "Oscar Wilde", "Gothic Fiction"),
            roman(r"^CHAPTER ([IVXLCDM]+)\.$").with_raw_match(),
            "Picture_Section_",
            OutputLayout::Verbatim,
        ),
        sectioned(
            "crime",
            book("Crime and Punishment", "Fyodor Dostoevsky", "Novel"),
            // Chapter numerals restart in every part
            HeadingSpec::pattern(r"^CHAPTER ([IVXLCDM]+)$", LabelKind::Verbatim)
                .with_preamble(false),
            "Crime_Section_",
            OutputLayout::Verbatim,
        ),
        sectioned(
            "jung",
            book("Psychology of the Unconscious", "Carl Gustav Jung", "Psychology"),
            HeadingSpec::pattern(r"^([IVXLCDM]+)\.$", LabelKind::Verbatim),
            "Jung_Section_",
            OutputLayout::Verbatim,
        ),
        parts_1984,
        part_one_1984,
        part_two_1984,
    ]
}
