use crate::domain::model::RawLine;
use crate::parser::rules::{ParserRules, MIN_SEGMENT_TOKENS};

/// Splits raw OCR text into token lists, one per retained line.
///
/// Line numbers count every line of the trimmed text, blank ones included,
/// so the header window is positional rather than "first non-empty lines".
pub fn segment_lines(ocr_text: &str, rules: &ParserRules) -> Vec<RawLine> {
    let mut lines = Vec::new();

    for (line_no, raw) in ocr_text.trim().lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line_no < rules.header_scan_lines && line.contains(rules.header_phrase.as_str()) {
            tracing::debug!("Skip header (line {}): {}", line_no, line);
            continue;
        }

        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if tokens.len() < MIN_SEGMENT_TOKENS {
            tracing::debug!("Skip short line (line {}): {}", line_no, line);
            continue;
        }

        tracing::trace!("Line {} tokens: {:?}", line_no, tokens);
        lines.push(RawLine::new(line_no, tokens));
    }

    if lines.is_empty() {
        tracing::debug!("No significant lines in OCR text");
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<Vec<String>> {
        segment_lines(text, &ParserRules::default())
            .into_iter()
            .map(|l| l.tokens)
            .collect()
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\n\t\n  ").is_empty());
    }

    #[test]
    fn test_header_in_first_lines_is_dropped() {
        let text = "Sent Received Type Date\n$50 Item GTL Feb 1 2024";
        let lines = segment(text);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0], "$50");
    }

    #[test]
    fn test_header_inside_longer_line_is_dropped() {
        let text = "Price Sent Received Type Date\n$50 Item Feb 1 2024";
        assert_eq!(segment(text).len(), 1);
    }

    #[test]
    fn test_header_after_scan_window_is_kept() {
        let text = "$1 A Jan 1 2024\n$2 B Jan 2 2024\n$3 C Jan 3 2024\nSent Received Type Date";
        let lines = segment(text);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], vec!["Sent", "Received", "Type", "Date"]);
    }

    #[test]
    fn test_blank_lines_count_towards_header_window() {
        // Header sits on line index 3 once the blank lines are counted.
        let text = "$1 A Jan 1 2024\n\n\nSent Received Type Date";
        let lines = segment(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].len(), 4);
    }

    #[test]
    fn test_leading_blank_lines_are_trimmed_before_counting() {
        let text = "\n\n\n\nSent Received Type Date\n$5 A Jan 1 2024";
        assert_eq!(segment(text).len(), 1);
    }

    #[test]
    fn test_short_lines_are_dropped() {
        let text = "Listings\n$50 Item\n$50 Item Feb 1 2024";
        let lines = segment(text);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 5);
    }

    #[test]
    fn test_whitespace_is_collapsed_and_order_kept() {
        let text = "  $10   Red\tApple  Mar 3 2023  \r\n$20 Green Pear Apr 4 2023";
        let raw = segment_lines(text, &ParserRules::default());
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].tokens, vec!["$10", "Red", "Apple", "Mar", "3", "2023"]);
        assert_eq!(raw[0].line_no, 0);
        assert_eq!(raw[1].tokens[0], "$20");
        assert_eq!(raw[1].line_no, 1);
    }

    #[test]
    fn test_custom_header_phrase() {
        let rules = ParserRules {
            header_phrase: "Price Item When".to_string(),
            ..ParserRules::default()
        };
        let lines = segment_lines("Price Item When\n$5 A Jan 1 2024", &rules);
        assert_eq!(lines.len(), 1);
    }
}
