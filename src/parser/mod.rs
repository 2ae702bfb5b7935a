//! OCR text to listing records.
//!
//! Parsing runs in two stages. [`segment_lines`] turns raw text into token
//! lists and [`structure_tokens`] turns each token list into a
//! [`ListingRecord`] or a [`Rejection`]. A rejected line never aborts the
//! lines after it.

pub mod rules;
pub mod segmenter;
pub mod structurer;

pub use rules::ParserRules;
pub use segmenter::segment_lines;
pub use structurer::structure_tokens;

use crate::domain::model::{ListingRecord, ParseReport, RawLine, RejectedLine};

#[derive(Debug, Clone, Default)]
pub struct ListingParser {
    rules: ParserRules,
}

impl ListingParser {
    pub fn new(rules: ParserRules) -> Self {
        Self { rules }
    }

    pub fn segment(&self, ocr_text: &str) -> Vec<RawLine> {
        segment_lines(ocr_text, &self.rules)
    }

    pub fn structure(&self, line: &RawLine) -> Option<ListingRecord> {
        structure_tokens(&line.tokens, &self.rules).ok()
    }

    /// Structures every line, keeping records and rejections in input order.
    pub fn structure_all(&self, lines: Vec<RawLine>) -> ParseReport {
        let mut report = ParseReport {
            segmented_lines: lines.len(),
            ..ParseReport::default()
        };

        for line in lines {
            match structure_tokens(&line.tokens, &self.rules) {
                Ok(record) => {
                    tracing::debug!("Line {} -> {}", line.line_no, record);
                    report.records.push(record);
                }
                Err(reason) => {
                    tracing::debug!(
                        "Line {} rejected: {} ({:?})",
                        line.line_no,
                        reason,
                        line.tokens
                    );
                    report.rejected.push(RejectedLine { line, reason });
                }
            }
        }

        report
    }

    pub fn parse(&self, ocr_text: &str) -> ParseReport {
        self.structure_all(self.segment(ocr_text))
    }
}
