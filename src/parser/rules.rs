use serde::{Deserialize, Serialize};

/// Header row printed by the listing window above the rows.
pub const DEFAULT_HEADER_PHRASE: &str = "Sent Received Type Date";
/// The header is only recognised within this many leading lines.
pub const DEFAULT_HEADER_SCAN_LINES: usize = 3;
/// Category tags printed after the item name.
pub const DEFAULT_CATEGORY_CODES: &[&str] = &["GTL", "GM"];
pub const PLACEHOLDER_NAME: &str = "Unknown Item";

/// Lines with fewer tokens cannot hold a price and a date.
pub const MIN_SEGMENT_TOKENS: usize = 3;
/// Price, at least the date triple.
pub const MIN_RECORD_TOKENS: usize = 4;

/// Exclusive bounds on accepted years.
pub const YEAR_FLOOR: i32 = 1990;
pub const YEAR_CEILING: i32 = 2100;

const MONTHS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Case-insensitive lookup of a three-letter English month abbreviation.
pub fn month_number(abbrev: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(abbrev))
        .map(|(_, number)| *number)
}

/// Tunable parts of the parser, loaded from the `[parser]` settings section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserRules {
    pub header_phrase: String,
    pub header_scan_lines: usize,
    pub category_codes: Vec<String>,
}

impl Default for ParserRules {
    fn default() -> Self {
        Self {
            header_phrase: DEFAULT_HEADER_PHRASE.to_string(),
            header_scan_lines: DEFAULT_HEADER_SCAN_LINES,
            category_codes: DEFAULT_CATEGORY_CODES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl ParserRules {
    pub fn is_category_code(&self, token: &str) -> bool {
        self.category_codes
            .iter()
            .any(|code| code.eq_ignore_ascii_case(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_lookup_ignores_case() {
        assert_eq!(month_number("Jan"), Some(1));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("sep"), Some(9));
        assert_eq!(month_number("Sept"), None);
        assert_eq!(month_number("January"), None);
    }

    #[test]
    fn test_default_category_codes() {
        let rules = ParserRules::default();
        assert!(rules.is_category_code("GTL"));
        assert!(rules.is_category_code("gm"));
        assert!(!rules.is_category_code("GTLX"));
    }
}
