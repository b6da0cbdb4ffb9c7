use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, info, warn};

use pdftext_core::config::AppConfig;
use pdftext_core::error::{PdfTextError, Result};
use pdftext_core::extraction::DocumentFetcher;

/// Downloads documents over HTTP with a per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.fetch_timeout(), &config.user_agent)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PdfTextError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // A mislabelled response is still handed to the extractors.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_lowercase);
        if !is_pdf_content_type(content_type.as_deref()) {
            warn!(
                url,
                content_type = content_type.as_deref().unwrap_or(""),
                "Content type is not PDF"
            );
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(PdfTextError::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!(url, "Downloading PDF");

        match self.download(url).await {
            Ok(bytes) => {
                debug!(url, bytes = bytes.len(), "Download complete");
                Ok(bytes)
            }
            Err(e) => {
                error!(url, error = %e, "Failed to download PDF");
                Err(e)
            }
        }
    }
}

/// True when a (lower-cased) `content-type` value mentions PDF.
pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("pdf"))
}
