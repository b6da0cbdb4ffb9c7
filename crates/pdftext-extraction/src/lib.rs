use std::panic::{self, AssertUnwindSafe};

use pdftext_core::ExtractionAttempt;

mod fetcher;
mod layout;
mod page_text;
mod pipeline;

pub use fetcher::{is_pdf_content_type, HttpFetcher};
pub use layout::LayoutExtractor;
pub use page_text::LopdfExtractor;
pub use pipeline::{resolve_text, ExtractionOrchestrator};

/// Run a parser, turning a panic inside it into a failed attempt.
pub(crate) fn contain_panics<F>(extractor: &str, parse: F) -> ExtractionAttempt
where
    F: FnOnce() -> ExtractionAttempt,
{
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(attempt) => attempt,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string());
            tracing::error!(extractor, reason = %reason, "PDF parser panicked");
            ExtractionAttempt::Failed(reason)
        }
    }
}
