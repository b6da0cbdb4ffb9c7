pub mod api_types;
pub mod config;
pub mod error;
pub mod extraction;

pub use config::AppConfig;
pub use error::{PdfTextError, Result};
pub use extraction::{
    BatchOutcome, DocumentFetcher, DocumentOutcome, ExtractionAttempt, ExtractionStage,
    TextExtractor, UrlOutcome,
};
