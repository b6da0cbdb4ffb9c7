use lopdf::Document;
use tracing::{debug, error};

use pdftext_core::extraction::{ExtractionAttempt, TextExtractor};

use crate::contain_panics;

const NAME: &str = "lopdf";

/// Content-stream extractor built on `lopdf`. Lower fidelity on complex
/// layouts, but it loads documents the layout extractor gives up on, and a
/// page that fails to decode only loses that page.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn name(&self) -> &str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> ExtractionAttempt {
        contain_panics(NAME, || {
            let doc = match Document::load_mem(bytes) {
                Ok(doc) => doc,
                Err(e) => {
                    error!(extractor = NAME, error = %e, "lopdf extraction failed");
                    return ExtractionAttempt::Failed(e.to_string());
                }
            };

            // get_pages is keyed by page number, so iteration is in page order.
            let pages = doc.get_pages();
            let texts = pages.keys().filter_map(|&page| match doc.extract_text(&[page]) {
                Ok(text) => Some(text),
                Err(e) => {
                    debug!(extractor = NAME, page, error = %e, "Skipping undecodable page");
                    None
                }
            });

            ExtractionAttempt::from_pages(texts)
        })
    }
}
