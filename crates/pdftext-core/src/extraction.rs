use async_trait::async_trait;

use crate::error::Result;

/// Retrieves the raw bytes of a remote document.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Converts document bytes into plain text. Implementations never fail the
/// caller; parse problems are reported as [`ExtractionAttempt::Failed`].
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &str;
    fn extract(&self, bytes: &[u8]) -> ExtractionAttempt;
}

/// Result of running a single extractor over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionAttempt {
    /// Non-empty, trimmed text.
    Text(String),
    /// The document parsed but produced no text.
    Empty,
    /// The document could not be parsed.
    Failed(String),
}

impl ExtractionAttempt {
    /// Join per-page text the way both extractors do: pages that produced text
    /// are each followed by a newline, pages without text add nothing, and the
    /// whole result is trimmed.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for page in pages {
            let page = page.as_ref();
            if !page.is_empty() {
                joined.push_str(page);
                joined.push('\n');
            }
        }

        let trimmed = joined.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            _ => String::new(),
        }
    }

    /// Character count of the extracted text, 0 when there is none.
    pub fn char_len(&self) -> usize {
        self.text().map(|t| t.chars().count()).unwrap_or(0)
    }

    /// Whether the attempt produced at least `min_chars` characters of text.
    pub fn meets(&self, min_chars: usize) -> bool {
        match self {
            Self::Text(text) => text.trim().chars().count() >= min_chars,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    Primary,
    Fallback,
}

/// Final verdict for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Extracted {
        text: String,
        length: usize,
        stage: ExtractionStage,
    },
    DownloadFailed {
        reason: String,
    },
    Unreadable {
        extracted_length: usize,
    },
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOutcome {
    pub url: String,
    pub outcome: DocumentOutcome,
}

/// Per-URL outcomes in input order.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: Vec<UrlOutcome>,
    pub total_processed: usize,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }
}
