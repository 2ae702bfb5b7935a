use crate::capture::CaptureOutcome;
use crate::domain::ports::{OcrEngine, OcrMode, TextSource};
use crate::utils::error::{LedgerError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Text that was already recognised and saved to a file.
#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextSource for TextFileSource {
    async fn read_text(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        format!("text file {}", self.path.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StdinSource;

#[async_trait]
impl TextSource for StdinSource {
    async fn read_text(&self) -> Result<String> {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(text)
    }

    fn describe(&self) -> String {
        "standard input".to_string()
    }
}

/// Recognises a captured image with an OCR engine.
pub struct OcrImageSource<E: OcrEngine> {
    engine: E,
    capture: CaptureOutcome,
    mode: OcrMode,
}

impl<E: OcrEngine> OcrImageSource<E> {
    pub fn new(engine: E, capture: CaptureOutcome, mode: OcrMode) -> Self {
        Self {
            engine,
            capture,
            mode,
        }
    }
}

#[async_trait]
impl<E: OcrEngine> TextSource for OcrImageSource<E> {
    async fn read_text(&self) -> Result<String> {
        match &self.capture {
            CaptureOutcome::Image(path) => self.engine.recognize(path, self.mode).await,
            CaptureOutcome::Failed { reason } => Err(LedgerError::CaptureError {
                reason: reason.clone(),
            }),
        }
    }

    fn describe(&self) -> String {
        match &self.capture {
            CaptureOutcome::Image(path) => format!("OCR of {} ({:?})", path.display(), self.mode),
            CaptureOutcome::Failed { .. } => "failed capture".to_string(),
        }
    }
}
