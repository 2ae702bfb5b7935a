use crate::domain::model::{ListingRecord, ParseReport, RawLine, SaveSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// How much of the image the OCR engine should treat as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OcrMode {
    /// One listing row.
    #[default]
    #[cfg_attr(feature = "cli", value(name = "single"))]
    SingleLine,
    /// A block of rows, possibly with a header.
    Region,
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &Path, mode: OcrMode) -> Result<String>;
}

/// Where raw OCR text comes from.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn read_text(&self) -> Result<String>;
    fn describe(&self) -> String;
}

#[async_trait]
pub trait RecordSink: Send + Sync {
    fn name(&self) -> &str;
    /// Appends every record and returns how many were written.
    async fn append(&self, records: &[ListingRecord]) -> Result<usize>;
}

pub trait ConfigProvider: Send + Sync {
    fn csv_path(&self) -> &str;
    fn save_csv(&self) -> bool;
    fn save_sheets(&self) -> bool;
    fn spreadsheet_id(&self) -> Option<&str>;
    fn worksheet_name(&self) -> &str;
    fn access_token(&self) -> Option<&str>;
    fn sheets_api_base(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawLine>>;
    async fn transform(&self, lines: Vec<RawLine>) -> Result<ParseReport>;
    async fn load(&self, report: &ParseReport) -> Result<SaveSummary>;
}
