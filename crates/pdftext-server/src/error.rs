use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use pdftext_core::api_types::{ErrorResponse, DOWNLOAD_FAILED, UNREADABLE_DOCUMENT};
use pdftext_core::PdfTextError;

/// Every way a request can fail, and the status each one maps to.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    DownloadFailed { url: String },
    Unreadable { url: String, extracted_length: usize },
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::DownloadFailed { .. } => StatusCode::BAD_REQUEST,
            Self::Unreadable { .. } => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorResponse {
        match self {
            Self::BadRequest(message) => ErrorResponse::new(message),
            Self::DownloadFailed { url } => ErrorResponse {
                url: Some(url),
                ..ErrorResponse::new(DOWNLOAD_FAILED)
            },
            Self::Unreadable {
                url,
                extracted_length,
            } => ErrorResponse {
                url: Some(url),
                extracted_length: Some(extracted_length),
                ..ErrorResponse::new(UNREADABLE_DOCUMENT)
            },
            Self::Internal(message) => {
                ErrorResponse::new(format!("Internal server error: {message}"))
            }
        }
    }
}

impl From<PdfTextError> for ApiError {
    fn from(e: PdfTextError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(message) = &self {
            error!(error = %message, "Extraction error");
        }
        (status, Json(self.into_body())).into_response()
    }
}
