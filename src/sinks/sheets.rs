use crate::domain::model::ListingRecord;
use crate::domain::ports::RecordSink;
use crate::utils::error::{LedgerError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_WORKSHEET: &str = "Sheet1";

static SHEET_URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"spreadsheets/d/([A-Za-z0-9_-]+)").expect("sheet url pattern is valid")
});

/// Accepts either a full Google Sheets URL or a bare spreadsheet id.
pub fn extract_spreadsheet_id(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LedgerError::InvalidConfigValueError {
            field: "sheet.spreadsheet_id".to_string(),
            value: input.to_string(),
            reason: "Sheet ID/URL is empty".to_string(),
        });
    }

    if input.contains("spreadsheets/d/") {
        return SHEET_URL_ID
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| LedgerError::InvalidConfigValueError {
                field: "sheet.spreadsheet_id".to_string(),
                value: input.to_string(),
                reason: "Invalid Google Sheet URL format".to_string(),
            });
    }

    Ok(input.to_string())
}

#[derive(Debug, Clone)]
pub struct SheetTarget {
    pub api_base: String,
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub access_token: String,
}

#[derive(Serialize)]
struct AppendRequest<'a> {
    #[serde(rename = "majorDimension")]
    major_dimension: &'a str,
    values: Vec<serde_json::Value>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_rows: Option<usize>,
    updated_range: Option<String>,
}

/// Appends rows through the Sheets `values:append` endpoint.
pub struct SheetsSink {
    client: Client,
    target: SheetTarget,
}

impl SheetsSink {
    pub fn new(target: SheetTarget) -> Self {
        Self {
            client: Client::new(),
            target,
        }
    }

    pub fn append_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.target.api_base).map_err(|e| {
            LedgerError::InvalidConfigValueError {
                field: "sheet.api_base".to_string(),
                value: self.target.api_base.clone(),
                reason: e.to_string(),
            }
        })?;

        let range = format!("{}:append", self.target.worksheet);
        url.path_segments_mut()
            .map_err(|_| LedgerError::config("sheet.api_base cannot be a base URL"))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.target.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }

    fn request_body(records: &[ListingRecord]) -> AppendRequest<'static> {
        AppendRequest {
            major_dimension: "ROWS",
            values: records
                .iter()
                .map(|r| serde_json::json!([r.name(), r.price(), r.date_display()]))
                .collect(),
        }
    }
}

#[async_trait]
impl RecordSink for SheetsSink {
    fn name(&self) -> &str {
        "Sheets"
    }

    async fn append(&self, records: &[ListingRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let url = self.append_url()?;
        tracing::debug!("Appending {} rows via {}", records.len(), url);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.target.access_token)
            .json(&Self::request_body(records))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::SinkError {
                sink: self.name().to_string(),
                message: format!("HTTP {}: {}", status, body.trim()),
            });
        }

        let parsed: AppendResponse = response.json().await.unwrap_or_default();
        let updates = parsed.updates.unwrap_or_default();
        if let Some(range) = &updates.updated_range {
            tracing::info!("Sheets updated range {}", range);
        }
        let saved = updates.updated_rows.unwrap_or(records.len());
        if saved > records.len() {
            tracing::warn!("Sheets reported {} rows for a batch of {}", saved, records.len());
        }
        Ok(saved.min(records.len()))
    }
}
