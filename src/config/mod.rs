pub mod cli;
pub mod settings;

pub use settings::AppSettings;

#[cfg(feature = "cli")]
pub use args::{CaptureArgs, CliConfig, Command};

#[cfg(feature = "cli")]
mod args {
    use super::settings::{AppSettings, DEFAULT_SETTINGS_PATH};
    use crate::domain::ports::OcrMode;
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::Validate;
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "listing-ledger")]
    #[command(about = "Turn OCR'd marketplace listings into CSV rows and Google Sheet rows")]
    pub struct CliConfig {
        /// Settings file (TOML). Missing file means defaults.
        #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
        pub settings: PathBuf,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
        pub log_format: LogFormat,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Parse listings from OCR text or an image and save them
        Capture(CaptureArgs),

        /// Set the target spreadsheet from a Google Sheets URL or id
        SetSheet {
            /// Full sheet URL or bare spreadsheet id
            target: String,

            #[arg(long)]
            worksheet: Option<String>,
        },

        /// Print the effective settings
        ShowSettings,
    }

    #[derive(Debug, Clone, Args)]
    pub struct CaptureArgs {
        /// File with OCR text, or `-` for stdin
        #[arg(long, conflicts_with = "image", required_unless_present = "image")]
        pub text: Option<String>,

        /// Image to run through tesseract
        #[arg(long)]
        pub image: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OcrMode::SingleLine)]
        pub mode: OcrMode,

        #[arg(long, overrides_with = "no_csv")]
        pub csv: bool,

        #[arg(long, overrides_with = "csv")]
        pub no_csv: bool,

        #[arg(long)]
        pub csv_path: Option<String>,

        #[arg(long, overrides_with = "no_sheets")]
        pub sheets: bool,

        #[arg(long, overrides_with = "sheets")]
        pub no_sheets: bool,

        /// Preview parsed listings without saving
        #[arg(long)]
        pub dry_run: bool,

        /// Print the preview as JSON
        #[arg(long)]
        pub json: bool,
    }

    impl CaptureArgs {
        /// Command-line flags win over the settings file.
        pub fn apply_overrides(&self, settings: &mut AppSettings) {
            if self.csv {
                settings.output.save_csv = true;
            } else if self.no_csv {
                settings.output.save_csv = false;
            }

            if self.sheets {
                settings.output.save_sheets = true;
            } else if self.no_sheets {
                settings.output.save_sheets = false;
            }

            if let Some(path) = &self.csv_path {
                settings.output.csv_path = path.clone();
            }
        }

        /// A dry run builds no sinks, so it does not need Sheets credentials.
        pub fn check_settings(&self, settings: &AppSettings) -> Result<()> {
            if self.dry_run {
                settings.validate_preview()
            } else {
                settings.validate()
            }
        }
    }

}
