use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Sheets request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Settings write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("OCR engine error: {message}")]
    OcrError { message: String },

    #[error("Capture failed: {reason}")]
    CaptureError { reason: String },

    #[error("Sink '{sink}' failed: {message}")]
    SinkError { sink: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Capture,
    Network,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LedgerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlParseError(_)
            | Self::TomlWriteError(_) => ErrorCategory::Configuration,
            Self::OcrError { .. } | Self::CaptureError { .. } => ErrorCategory::Capture,
            Self::ApiError(_) | Self::SinkError { .. } => ErrorCategory::Network,
            Self::IoError(_) | Self::CsvError(_) => ErrorCategory::Storage,
            Self::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Capture | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Exit code for the CLI. Low severity is reported but still succeeds.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::OcrError { .. } => "Text recognition failed for the captured image".to_string(),
            Self::CaptureError { reason } => format!("No usable image: {}", reason),
            Self::ApiError(_) | Self::SinkError { .. } => {
                "Could not save listings to the configured destination".to_string()
            }
            Self::MissingConfigError { field } => format!("Setting '{}' is required", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::TomlParseError(_) => "The settings file is not valid TOML".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::OcrError { .. } => {
                "Install tesseract or point [ocr].tesseract_cmd at the binary"
            }
            Self::CaptureError { .. } => "Check the image path and that it is a PNG/JPEG/BMP/TIFF file",
            Self::ApiError(_) | Self::SinkError { .. } => {
                "Check the spreadsheet id, worksheet name and access token, then retry"
            }
            Self::MissingConfigError { .. } => "Run `listing-ledger set-sheet <url>` or edit the settings file",
            Self::InvalidConfigValueError { .. }
            | Self::ConfigError { .. }
            | Self::TomlParseError(_)
            | Self::TomlWriteError(_) => "Fix the settings file and run again",
            Self::IoError(_) | Self::CsvError(_) => {
                "Check that the output path is writable and has free space"
            }
            Self::SerializationError(_) => "Report this as a bug with the input that triggered it",
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
