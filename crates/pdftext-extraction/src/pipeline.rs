use std::sync::Arc;

use tracing::{error, info};

use pdftext_core::config::AppConfig;
use pdftext_core::error::Result;
use pdftext_core::extraction::{
    BatchOutcome, DocumentFetcher, DocumentOutcome, ExtractionAttempt, ExtractionStage,
    TextExtractor, UrlOutcome,
};

use crate::fetcher::HttpFetcher;
use crate::layout::LayoutExtractor;
use crate::page_text::LopdfExtractor;

/// Downloads documents and runs them through the primary extractor, falling
/// back to the secondary one when the primary yields too little text.
pub struct ExtractionOrchestrator {
    fetcher: Arc<dyn DocumentFetcher>,
    primary: Arc<dyn TextExtractor>,
    fallback: Arc<dyn TextExtractor>,
    min_text_length: usize,
}

impl ExtractionOrchestrator {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        primary: Arc<dyn TextExtractor>,
        fallback: Arc<dyn TextExtractor>,
        min_text_length: usize,
    ) -> Self {
        Self {
            fetcher,
            primary,
            fallback,
            min_text_length,
        }
    }

    /// HTTP fetcher, `pdf-extract` as primary and `lopdf` as fallback.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(HttpFetcher::from_config(config)?),
            Arc::new(LayoutExtractor),
            Arc::new(LopdfExtractor),
            config.min_text_length,
        ))
    }

    /// Run the full pipeline for one URL.
    ///
    /// Download and extraction problems are reported in the returned
    /// [`DocumentOutcome`]; `Err` is reserved for faults outside the pipeline,
    /// such as the blocking extraction task being lost.
    pub async fn process(&self, url: &str) -> Result<DocumentOutcome> {
        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(DocumentOutcome::DownloadFailed {
                    reason: e.to_string(),
                })
            }
        };

        let primary = Arc::clone(&self.primary);
        let fallback = Arc::clone(&self.fallback);
        let min = self.min_text_length;

        // Parsing is CPU-bound; the bytes move into the task and are dropped with it.
        let (attempt, stage) = tokio::task::spawn_blocking(move || {
            resolve_text(primary.as_ref(), fallback.as_ref(), &bytes, min)
        })
        .await?;

        let outcome = if attempt.meets(min) {
            let length = attempt.char_len();
            info!(url, ?stage, chars = length, "Extracted text");
            DocumentOutcome::Extracted {
                text: attempt.into_text(),
                length,
                stage,
            }
        } else {
            let extracted_length = attempt.char_len();
            error!(
                url,
                chars = extracted_length,
                min_chars = min,
                "Could not extract readable text"
            );
            DocumentOutcome::Unreadable { extracted_length }
        };

        Ok(outcome)
    }

    /// Process each URL in order. Individual failures are recorded in the
    /// result list; they never abort the batch.
    pub async fn process_batch(&self, urls: &[String]) -> Result<BatchOutcome> {
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        for (i, url) in urls.iter().enumerate() {
            info!(url = %url, "Processing PDF {}/{}", i + 1, total);
            let outcome = self.process(url).await?;
            results.push(UrlOutcome {
                url: url.clone(),
                outcome,
            });
        }

        let batch = BatchOutcome {
            results,
            total_processed: total,
        };

        info!(
            total,
            succeeded = batch.succeeded(),
            "Batch extraction complete"
        );

        Ok(batch)
    }
}

/// Two-stage extraction: the fallback runs only when the primary attempt does
/// not reach `min_chars` characters, whether it failed, came back empty or was
/// merely too short.
pub fn resolve_text(
    primary: &dyn TextExtractor,
    fallback: &dyn TextExtractor,
    bytes: &[u8],
    min_chars: usize,
) -> (ExtractionAttempt, ExtractionStage) {
    let first = primary.extract(bytes);
    if first.meets(min_chars) {
        return (first, ExtractionStage::Primary);
    }

    info!(
        primary = primary.name(),
        fallback = fallback.name(),
        chars = first.char_len(),
        "Trying fallback extractor"
    );
    (fallback.extract(bytes), ExtractionStage::Fallback)
}
