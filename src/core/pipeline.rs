use crate::core::{ParseReport, Pipeline, RawLine, RecordSink, SaveSummary, SinkOutcome, TextSource};
use crate::parser::ListingParser;
use crate::utils::error::Result;

/// Text source -> parser -> sinks.
pub struct ListingPipeline<T: TextSource> {
    source: T,
    parser: ListingParser,
    sinks: Vec<Box<dyn RecordSink>>,
}

impl<T: TextSource> ListingPipeline<T> {
    pub fn new(source: T, parser: ListingParser, sinks: Vec<Box<dyn RecordSink>>) -> Self {
        Self {
            source,
            parser,
            sinks,
        }
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

#[async_trait::async_trait]
impl<T: TextSource> Pipeline for ListingPipeline<T> {
    async fn extract(&self) -> Result<Vec<RawLine>> {
        tracing::debug!("Reading OCR text from {}", self.source.describe());
        let text = self.source.read_text().await?;

        if text.trim().is_empty() {
            tracing::warn!("OCR produced no text");
            return Ok(Vec::new());
        }

        Ok(self.parser.segment(&text))
    }

    async fn transform(&self, lines: Vec<RawLine>) -> Result<ParseReport> {
        Ok(self.parser.structure_all(lines))
    }

    /// Runs every sink even when an earlier one fails; failures are recorded per sink.
    async fn load(&self, report: &ParseReport) -> Result<SaveSummary> {
        let attempted = report.records.len();
        let mut summary = SaveSummary {
            attempted,
            outcomes: Vec::with_capacity(self.sinks.len()),
        };

        for sink in &self.sinks {
            let outcome = match sink.append(&report.records).await {
                Ok(saved) => {
                    tracing::info!("{}: saved {}/{}", sink.name(), saved, attempted);
                    SinkOutcome {
                        sink: sink.name().to_string(),
                        attempted,
                        saved,
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::error!("{} save failed: {}", sink.name(), e);
                    tracing::error!("Suggestion: {}", e.recovery_suggestion());
                    SinkOutcome {
                        sink: sink.name().to_string(),
                        attempted,
                        saved: 0,
                        error: Some(e.to_string()),
                    }
                }
            };
            summary.outcomes.push(outcome);
        }

        Ok(summary)
    }
}
