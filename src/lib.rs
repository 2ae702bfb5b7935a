pub mod capture;
pub mod config;
pub mod core;
pub mod domain;
pub mod parser;
pub mod sinks;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use capture::{CaptureOutcome, TesseractOcr};
pub use config::{cli::LocalStorage, AppSettings};
pub use crate::core::{engine::LedgerEngine, pipeline::ListingPipeline};
pub use domain::model::{ListingRecord, ParseReport, RawLine, Rejection};
pub use parser::{ListingParser, ParserRules};
pub use utils::error::{LedgerError, Result};
