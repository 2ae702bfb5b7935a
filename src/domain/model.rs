use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Display format for listing dates: day/month/year.
pub const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Whitespace-separated tokens from one retained line of OCR output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Zero-based index of the line in the trimmed OCR text.
    pub line_no: usize,
    pub tokens: Vec<String>,
}

impl RawLine {
    pub fn new(line_no: usize, tokens: Vec<String>) -> Self {
        Self { line_no, tokens }
    }

    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self::new(0, tokens.iter().map(|t| t.as_ref().to_string()).collect())
    }
}

/// A structured marketplace listing. Only the parser constructs these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    name: String,
    price: f64,
    #[serde(serialize_with = "serialize_display_date")]
    date: NaiveDate,
}

fn serialize_display_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_DISPLAY_FORMAT))
}

impl ListingRecord {
    pub(crate) fn new(name: String, price: f64, date: NaiveDate) -> Self {
        Self { name, price, date }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn price_display(&self) -> String {
        format!("{:.2}", self.price)
    }

    pub fn date_display(&self) -> String {
        self.date.format(DATE_DISPLAY_FORMAT).to_string()
    }

    /// Inverse of [`ListingRecord::date_display`].
    pub fn parse_date_display(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, DATE_DISPLAY_FORMAT).ok()
    }

    /// Row layout shared by every sink: name, price, date.
    pub fn to_row(&self) -> [String; 3] {
        [self.name.clone(), self.price_display(), self.date_display()]
    }
}

impl std::fmt::Display for ListingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.name,
            self.price_display(),
            self.date_display()
        )
    }
}

/// Why a line did not become a record. Rejections are data, not failures:
/// the line is dropped and parsing continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("expected at least {min} tokens, got {found}")]
    TooFewTokens { found: usize, min: usize },

    #[error("invalid price token '{token}'")]
    InvalidPrice { token: String },

    #[error("could not read a date from {tokens:?}")]
    InvalidDate { tokens: Vec<String> },

    #[error("year {year} outside {min}..{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub line: RawLine,
    pub reason: Rejection,
}

/// Outcome of parsing one block of OCR text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Lines that survived segmentation.
    pub segmented_lines: usize,
    pub records: Vec<ListingRecord>,
    pub rejected: Vec<RejectedLine>,
}

impl ParseReport {
    /// Empty results mean "no usable data", which callers report rather than fail on.
    pub fn has_usable_data(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Per-sink result of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOutcome {
    pub sink: String,
    pub attempted: usize,
    pub saved: usize,
    pub error: Option<String>,
}

impl SinkOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.saved == self.attempted
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub attempted: usize,
    pub outcomes: Vec<SinkOutcome>,
}

impl SaveSummary {
    pub fn all_saved(&self) -> bool {
        self.outcomes.iter().all(SinkOutcome::is_complete)
    }

    /// One-line status, e.g. `Saved 3 to Sheets & CSV.` or `Sheets: 0/3. CSV: 3/3.`
    pub fn status_line(&self) -> String {
        let n = self.attempted;
        if self.outcomes.is_empty() {
            return "No save destination enabled.".to_string();
        }

        let names: Vec<&str> = self.outcomes.iter().map(|o| o.sink.as_str()).collect();
        if self.all_saved() {
            return format!("Saved {} to {}.", n, names.join(" & "));
        }

        if let [single] = self.outcomes.as_slice() {
            return format!(
                "{}: Failed to save {}/{}.",
                single.sink,
                n.saturating_sub(single.saved),
                n
            );
        }

        self.outcomes
            .iter()
            .map(|o| format!("{}: {}/{}.", o.sink, o.saved, n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
