use crate::domain::model::ListingRecord;
use crate::domain::ports::{RecordSink, Storage};
use crate::utils::error::{LedgerError, Result};
use async_trait::async_trait;

pub const DEFAULT_CSV_PATH: &str = "listings.csv";

/// Appends `name,price,date` rows (no header) to a CSV file.
pub struct CsvSink<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> CsvSink<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

pub fn encode_rows(records: &[ListingRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(record.to_row())?;
    }

    writer
        .into_inner()
        .map_err(|e| LedgerError::IoError(e.into_error()))
}

#[async_trait]
impl<S: Storage> RecordSink for CsvSink<S> {
    fn name(&self) -> &str {
        "CSV"
    }

    async fn append(&self, records: &[ListingRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let data = encode_rows(records)?;
        tracing::debug!(
            "Appending {} rows ({} bytes) to {}",
            records.len(),
            data.len(),
            self.path
        );
        self.storage.append_file(&self.path, &data).await?;
        Ok(records.len())
    }
}
