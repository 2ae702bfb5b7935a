pub mod csv_sink;
pub mod sheets;

pub use csv_sink::CsvSink;
pub use sheets::{extract_spreadsheet_id, SheetTarget, SheetsSink};

use crate::config::cli::LocalStorage;
use crate::domain::ports::{ConfigProvider, RecordSink};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

/// Builds the enabled sinks, Sheets first to match the save order users see.
pub fn sinks_from_config<C: ConfigProvider>(config: &C) -> Result<Vec<Box<dyn RecordSink>>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();

    if config.save_sheets() {
        let spreadsheet_id = config.spreadsheet_id();
        let spreadsheet_id = validate_required_field("sheet.spreadsheet_id", &spreadsheet_id)?;
        let access_token = config.access_token();
        let access_token = validate_required_field("sheet.access_token", &access_token)?;

        sinks.push(Box::new(SheetsSink::new(SheetTarget {
            api_base: config.sheets_api_base().to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet: config.worksheet_name().to_string(),
            access_token: access_token.to_string(),
        })));
    }

    if config.save_csv() {
        sinks.push(Box::new(CsvSink::new(
            LocalStorage::new(""),
            config.csv_path(),
        )));
    }

    Ok(sinks)
}
