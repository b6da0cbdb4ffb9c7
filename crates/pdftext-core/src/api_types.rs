use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extraction::{DocumentOutcome, UrlOutcome};

pub const SERVICE_NAME: &str = "PDF Text Extraction Service";
pub const SERVICE_VERSION: &str = "1.0";

pub const DOWNLOAD_FAILED: &str = "Failed to download PDF";
pub const UNREADABLE_DOCUMENT: &str = "Could not extract readable text from PDF";
pub const UNREADABLE_BATCH_ITEM: &str = "Could not extract readable text";

// --- Health ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
        }
    }
}

// --- Single document ---

/// Fields are kept as raw JSON so the handler can tell "missing" from "wrong type".
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExtractPdfRequest {
    #[serde(default)]
    pub url: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractPdfResponse {
    pub success: bool,
    pub text: String,
    pub length: usize,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_length: Option<usize>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            url: None,
            extracted_length: None,
        }
    }
}

// --- Batch ---

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExtractMultipleRequest {
    #[serde(default)]
    pub urls: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchItemResult {
    /// The entry exactly as it appeared in the request's `urls` array.
    pub url: Value,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<UrlOutcome> for BatchItemResult {
    fn from(item: UrlOutcome) -> Self {
        let UrlOutcome { url, outcome } = item;
        match outcome {
            DocumentOutcome::Extracted { text, length, .. } => Self {
                url: Value::String(url),
                success: true,
                text: Some(text),
                length: Some(length),
                error: None,
            },
            DocumentOutcome::DownloadFailed { .. } => Self {
                url: Value::String(url),
                success: false,
                text: None,
                length: None,
                error: Some(DOWNLOAD_FAILED.to_string()),
            },
            DocumentOutcome::Unreadable { .. } => Self {
                url: Value::String(url),
                success: false,
                text: None,
                length: None,
                error: Some(UNREADABLE_BATCH_ITEM.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractMultipleResponse {
    pub success: bool,
    pub results: Vec<BatchItemResult>,
    pub total_processed: usize,
}
