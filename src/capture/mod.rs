//! Acquiring OCR text: image capture outcomes, the tesseract adapter and
//! the text sources the pipeline reads from.

pub mod sources;
pub mod tesseract;

pub use sources::{OcrImageSource, StdinSource, TextFileSource};
pub use tesseract::TesseractOcr;

use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif", "webp"];

/// Result of trying to obtain an image to recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Image(PathBuf),
    Failed { reason: String },
}

impl CaptureOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Checks that `path` names an existing file with an image extension.
pub fn inspect_image(path: &Path) -> CaptureOutcome {
    if !path.is_file() {
        return CaptureOutcome::failed(format!("{} does not exist", path.display()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => {
            CaptureOutcome::Image(path.to_path_buf())
        }
        Some(ext) => CaptureOutcome::failed(format!(
            "unsupported image type '.{}' (expected one of: {})",
            ext,
            IMAGE_EXTENSIONS.join(", ")
        )),
        None => CaptureOutcome::failed(format!("{} has no file extension", path.display())),
    }
}
