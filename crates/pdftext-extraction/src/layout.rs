use tracing::{debug, error};

use pdftext_core::extraction::{ExtractionAttempt, TextExtractor};

use crate::contain_panics;

const NAME: &str = "pdf-extract";

/// Layout-aware extractor built on `pdf-extract`. It positions glyphs before
/// emitting text, which keeps multi-column pages and tables readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutExtractor;

impl TextExtractor for LayoutExtractor {
    fn name(&self) -> &str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> ExtractionAttempt {
        contain_panics(NAME, || match pdf_extract::extract_text_from_mem_by_pages(bytes) {
            Ok(pages) => {
                debug!(extractor = NAME, pages = pages.len(), "Parsed document");
                ExtractionAttempt::from_pages(pages)
            }
            Err(e) => {
                error!(extractor = NAME, error = %e, "pdf-extract extraction failed");
                ExtractionAttempt::Failed(e.to_string())
            }
        })
    }
}
