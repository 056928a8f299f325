//! Chapter label kinds and label-to-number conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitterError};
use crate::roman;

/// How a chapter label converts to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    /// Decimal digits, e.g. "12".
    #[default]
    Arabic,
    /// Roman numerals, e.g. "XII".
    Roman,
    /// English number words, e.g. "TWELVE" or "TWENTY-ONE".
    Words,
    /// Free text with no numeric value; ordering is positional.
    Verbatim,
}

impl LabelKind {
    /// Get the lowercase name used in profiles and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arabic => "arabic",
            Self::Roman => "roman",
            Self::Words => "words",
            Self::Verbatim => "verbatim",
        }
    }

    /// Whether labels of this kind carry their own number.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Verbatim)
    }

    /// Parse a label into its numeric value.
    ///
    /// `Verbatim` labels have no value and always fail; callers assign
    /// positional values instead.
    ///
    /// # Examples
    /// ```
    /// use alexandria_splitter::labels::LabelKind;
    ///
    /// assert_eq!(LabelKind::Roman.parse("XIV").unwrap(), 14);
    /// assert_eq!(LabelKind::Arabic.parse("117").unwrap(), 117);
    /// assert_eq!(LabelKind::Words.parse("twenty-one").unwrap(), 21);
    /// assert!(LabelKind::Roman.parse("THE LAST").is_err());
    /// ```
    pub fn parse(self, label: &str) -> Result<u32> {
        let label = label.trim();
        let value = match self {
            Self::Arabic => label.parse::<u32>().ok(),
            Self::Roman => roman::is_numeral(label).then(|| roman::to_int(label)),
            Self::Words => parse_number_words(label),
            Self::Verbatim => None,
        };

        value.ok_or_else(|| SplitterError::InvalidLabel {
            label: label.to_string(),
            kind: self.as_str().to_string(),
        })
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const UNITS: [&str; 19] = [
    "ONE",
    "TWO",
    "THREE",
    "FOUR",
    "FIVE",
    "SIX",
    "SEVEN",
    "EIGHT",
    "NINE",
    "TEN",
    "ELEVEN",
    "TWELVE",
    "THIRTEEN",
    "FOURTEEN",
    "FIFTEEN",
    "SIXTEEN",
    "SEVENTEEN",
    "EIGHTEEN",
    "NINETEEN",
];

const TENS: [&str; 8] = [
    "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];

fn unit_value(word: &str) -> Option<u32> {
    UNITS
        .iter()
        .position(|w| *w == word)
        .and_then(|i| u32::try_from(i + 1).ok())
}

fn tens_value(word: &str) -> Option<u32> {
    TENS.iter()
        .position(|w| *w == word)
        .and_then(|i| u32::try_from((i + 2) * 10).ok())
}

/// Parse English number words from one to ninety-nine.
fn parse_number_words(label: &str) -> Option<u32> {
    let upper = label.to_ascii_uppercase();
    let words: Vec<&str> = upper
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();

    match words.as_slice() {
        [single] => unit_value(single).or_else(|| tens_value(single)),
        [tens, unit] => {
            let tens = tens_value(tens)?;
            let unit = unit_value(unit).filter(|u| *u < 10)?;
            Some(tens + unit)
        }
        _ => None,
    }
}
