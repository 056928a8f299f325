//! Roman numeral conversion.
//!
//! Decoding is permissive: malformed numerals such as "IIII" or "VX" still
//! decode to *a* number. Callers that need canonical form can compare against
//! [`from_int`].

/// Value of a single Roman symbol, case-insensitive.
fn symbol_value(c: char) -> Option<u32> {
    match c.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Check whether a string is non-empty and consists only of Roman symbols.
///
/// # Examples
/// ```
/// use alexandria_splitter::roman::is_numeral;
///
/// assert!(is_numeral("XIV"));
/// assert!(is_numeral("xiv"));
/// assert!(!is_numeral("THE LAST"));
/// assert!(!is_numeral(""));
/// ```
pub fn is_numeral(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| symbol_value(c).is_some())
}

/// Convert a Roman numeral to an integer.
///
/// Scans right to left, adding a symbol's value when it is at least the value
/// of the symbol to its right and subtracting it otherwise. Characters that
/// are not Roman symbols count as zero.
///
/// # Examples
/// ```
/// use alexandria_splitter::roman::to_int;
///
/// assert_eq!(to_int("XIV"), 14);
/// assert_eq!(to_int("XLII"), 42);
/// assert_eq!(to_int("IIII"), 4);
/// ```
pub fn to_int(roman: &str) -> u32 {
    let mut total: i64 = 0;
    let mut prev = 0;

    for c in roman.chars().rev() {
        let value = symbol_value(c).unwrap_or(0);
        if value < prev {
            total -= i64::from(value);
        } else {
            total += i64::from(value);
        }
        prev = value;
    }

    u32::try_from(total.max(0)).unwrap_or(u32::MAX)
}

/// Encode an integer as a canonical Roman numeral.
///
/// Returns `None` outside 1..=3999, which standard notation cannot express.
///
/// # Examples
/// ```
/// use alexandria_splitter::roman::from_int;
///
/// assert_eq!(from_int(1994).as_deref(), Some("MCMXCIV"));
/// assert_eq!(from_int(0), None);
/// ```
pub fn from_int(mut n: u32) -> Option<String> {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    if !(1..=3999).contains(&n) {
        return None;
    }

    let mut out = String::new();
    for (value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    Some(out)
}
