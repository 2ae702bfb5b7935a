use crate::capture::tesseract::DEFAULT_TESSERACT_CMD;
use crate::config::cli::LocalStorage;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::parser::ParserRules;
use crate::sinks::csv_sink::DEFAULT_CSV_PATH;
use crate::sinks::sheets::{DEFAULT_SHEETS_API_BASE, DEFAULT_WORKSHEET};
use crate::utils::error::{LedgerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_required_field,
    validate_resolved, validate_spreadsheet_id, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SETTINGS_PATH: &str = "app_settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub sheet: SheetSettings,
    pub output: OutputSettings,
    pub parser: ParserRules,
    pub ocr: OcrSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    pub spreadsheet_id: Option<String>,
    pub worksheet_name: String,
    /// Usually `${GOOGLE_SHEETS_TOKEN}` so the token stays out of the file.
    pub access_token: Option<String>,
    pub api_base: String,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            worksheet_name: DEFAULT_WORKSHEET.to_string(),
            access_token: None,
            api_base: DEFAULT_SHEETS_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub csv_path: String,
    pub save_csv: bool,
    pub save_sheets: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_PATH.to_string(),
            save_csv: true,
            save_sheets: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    pub tesseract_cmd: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract_cmd: DEFAULT_TESSERACT_CMD.to_string(),
        }
    }
}

impl AppSettings {
    /// Loads settings, falling back to defaults when the file does not exist.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let bytes = LocalStorage::new("")
            .read_file(&path.to_string_lossy())
            .await?;
        let content = String::from_utf8(bytes).map_err(|e| {
            LedgerError::config(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        LocalStorage::new("")
            .write_file(&path.as_ref().to_string_lossy(), content.as_bytes())
            .await?;
        tracing::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Checks everything a preview needs. Sheets credentials are left to
    /// [`validate_config`](Self::validate_config) since nothing is saved.
    pub fn validate_preview(&self) -> Result<()> {
        validate_path("output.csv_path", &self.output.csv_path)?;
        validate_non_empty_string("ocr.tesseract_cmd", &self.ocr.tesseract_cmd)?;
        validate_non_empty_string("parser.header_phrase", &self.parser.header_phrase)?;
        validate_positive_number("parser.header_scan_lines", self.parser.header_scan_lines, 1)?;
        validate_url("sheet.api_base", &self.sheet.api_base)?;
        validate_non_empty_string("sheet.worksheet_name", &self.sheet.worksheet_name)?;

        if let Some(id) = &self.sheet.spreadsheet_id {
            validate_spreadsheet_id("sheet.spreadsheet_id", id)?;
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.validate_preview()?;

        if self.output.save_sheets {
            validate_required_field("sheet.spreadsheet_id", &self.sheet.spreadsheet_id)?;
            let token = validate_required_field("sheet.access_token", &self.sheet.access_token)?;
            validate_resolved("sheet.access_token", token)?;
        }

        Ok(())
    }
}

impl ConfigProvider for AppSettings {
    fn csv_path(&self) -> &str {
        &self.output.csv_path
    }

    fn save_csv(&self) -> bool {
        self.output.save_csv
    }

    fn save_sheets(&self) -> bool {
        self.output.save_sheets
    }

    fn spreadsheet_id(&self) -> Option<&str> {
        self.sheet.spreadsheet_id.as_deref()
    }

    fn worksheet_name(&self) -> &str {
        &self.sheet.worksheet_name
    }

    fn access_token(&self) -> Option<&str> {
        self.sheet.access_token.as_deref()
    }

    fn sheets_api_base(&self) -> &str {
        &self.sheet.api_base
    }
}

impl Validate for AppSettings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = AppSettings::from_toml_str("").unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.sheet.worksheet_name, "Sheet1");
        assert_eq!(settings.output.csv_path, "listings.csv");
        assert!(settings.output.save_csv);
        assert!(!settings.output.save_sheets);
        assert_eq!(settings.parser.category_codes, vec!["GTL", "GM"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_full_settings() {
        let toml_content = r#"
[sheet]
spreadsheet_id = "1AbC_d-9"
worksheet_name = "Sales"
access_token = "ya29.token"

[output]
csv_path = "out/sales.csv"
save_sheets = true

[parser]
category_codes = ["GTL", "GM", "AH"]

[ocr]
tesseract_cmd = "/usr/local/bin/tesseract"
"#;

        let settings = AppSettings::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.spreadsheet_id(), Some("1AbC_d-9"));
        assert_eq!(settings.worksheet_name(), "Sales");
        assert_eq!(settings.csv_path(), "out/sales.csv");
        assert!(settings.save_sheets());
        assert!(settings.save_csv());
        assert_eq!(settings.parser.category_codes.len(), 3);
        assert_eq!(settings.parser.header_scan_lines, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LEDGER_TEST_SHEETS_TOKEN", "secret-token");

        let toml_content = r#"
[sheet]
spreadsheet_id = "abc"
access_token = "${LEDGER_TEST_SHEETS_TOKEN}"
"#;

        let settings = AppSettings::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.access_token(), Some("secret-token"));

        std::env::remove_var("LEDGER_TEST_SHEETS_TOKEN");
    }

    #[test]
    fn test_sheets_enabled_without_token_fails_validation() {
        let toml_content = r#"
[sheet]
spreadsheet_id = "abc"
access_token = "${LEDGER_TEST_UNSET_VARIABLE}"

[output]
save_sheets = true
"#;

        let settings = AppSettings::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            settings.validate(),
            Err(LedgerError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_preview_skips_sheets_credentials() {
        let settings =
            AppSettings::from_toml_str("[output]\nsave_sheets = true\n").unwrap();
        assert!(settings.validate_preview().is_ok());
        assert!(matches!(
            settings.validate(),
            Err(LedgerError::MissingConfigError { .. })
        ));

        let settings = AppSettings::from_toml_str(
            "[output]\nsave_sheets = true\n[sheet]\napi_base = \"not a url\"",
        )
        .unwrap();
        assert!(settings.validate_preview().is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let settings = AppSettings::from_toml_str("[sheet]\napi_base = \"not a url\"").unwrap();
        assert!(settings.validate().is_err());

        let settings = AppSettings::from_toml_str("[parser]\nheader_scan_lines = 0").unwrap();
        assert!(settings.validate().is_err());

        let settings = AppSettings::from_toml_str("[sheet]\nspreadsheet_id = \"a/b\"").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(
            AppSettings::from_toml_str("[sheet\n"),
            Err(LedgerError::TomlParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app_settings.toml");

        let mut settings = AppSettings::default();
        settings.sheet.spreadsheet_id = Some("1AbC_d-9".to_string());
        settings.sheet.worksheet_name = "Sales".to_string();
        settings.save(&path).await.unwrap();

        let loaded = AppSettings::load(&path).await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_invalid_utf8_settings_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app_settings.toml");
        tokio::fs::write(&path, b"[sheet]\naccess_token = \"ya29.\xff\xfe\"\n")
            .await
            .unwrap();

        let err = AppSettings::load(&path).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::ConfigError { ref message } if message.contains("UTF-8")
        ));
    }

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = AppSettings::load(dir.path().join("absent.toml"))
            .await
            .unwrap();
        assert_eq!(loaded, AppSettings::default());
    }
}
