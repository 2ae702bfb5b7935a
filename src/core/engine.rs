use crate::core::{ParseReport, Pipeline, SaveSummary};
use crate::utils::error::Result;

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub parse: ParseReport,
    /// `None` when nothing was saved: dry run or no usable data.
    pub saved: Option<SaveSummary>,
}

impl RunReport {
    pub fn has_usable_data(&self) -> bool {
        self.parse.has_usable_data()
    }
}

pub struct LedgerEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> LedgerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Reading listing text...");
        let lines = self.pipeline.extract().await?;
        tracing::info!("Segmented {} candidate lines", lines.len());

        let parse = self.pipeline.transform(lines).await?;
        tracing::info!(
            "Structured {} listings ({} lines rejected)",
            parse.records.len(),
            parse.rejected.len()
        );

        if !parse.has_usable_data() {
            tracing::warn!("No usable listings in OCR text; check the capture or selection");
            return Ok(RunReport { parse, saved: None });
        }

        if self.dry_run {
            tracing::info!("Dry run: skipping save");
            return Ok(RunReport { parse, saved: None });
        }

        let summary = self.pipeline.load(&parse).await?;
        tracing::info!("{}", summary.status_line());

        Ok(RunReport {
            parse,
            saved: Some(summary),
        })
    }
}
