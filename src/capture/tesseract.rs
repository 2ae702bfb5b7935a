use crate::domain::ports::{OcrEngine, OcrMode};
use crate::utils::error::{LedgerError, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

/// Runs the `tesseract` CLI and returns whatever it prints to stdout.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Page segmentation mode: 7 treats the image as one text line, 6 as a block.
    fn page_segmentation(mode: OcrMode) -> &'static str {
        match mode {
            OcrMode::SingleLine => "7",
            OcrMode::Region => "6",
        }
    }

    pub async fn version(&self) -> Result<String> {
        let output = Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .map_err(|e| LedgerError::OcrError {
                message: format!("cannot run '{}': {}", self.command, e),
            })?;

        // Older builds print the version banner on stderr.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(String::from_utf8_lossy(&banner)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_CMD)
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &Path, mode: OcrMode) -> Result<String> {
        tracing::debug!(
            "Running {} on {} ({:?})",
            self.command,
            image.display(),
            mode
        );

        let output = Command::new(&self.command)
            .arg(image)
            .arg("stdout")
            .args(["--oem", "3", "--psm", Self::page_segmentation(mode)])
            .output()
            .await
            .map_err(|e| LedgerError::OcrError {
                message: format!("cannot run '{}': {}", self.command, e),
            })?;

        if !output.status.success() {
            return Err(LedgerError::OcrError {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!("Raw OCR text:\n{}", text.trim());
        Ok(text)
    }
}
