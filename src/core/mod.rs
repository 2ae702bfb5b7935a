pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{ListingRecord, ParseReport, RawLine, SaveSummary, SinkOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSink, Storage, TextSource};
pub use crate::utils::error::Result;
