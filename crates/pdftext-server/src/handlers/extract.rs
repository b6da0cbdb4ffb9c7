use axum::{body::Bytes, extract::State, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use pdftext_core::api_types::{
    BatchItemResult, ExtractMultipleRequest, ExtractMultipleResponse, ExtractPdfRequest,
    ExtractPdfResponse,
};
use pdftext_core::DocumentOutcome;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn extract_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExtractPdfResponse>, ApiError> {
    let request: ExtractPdfRequest = parse_body(&body);

    let url = match request.url {
        None | Some(Value::Null) => return Err(ApiError::bad_request("Missing 'url' parameter")),
        Some(Value::String(url)) => url,
        Some(_) => return Err(ApiError::bad_request("'url' should be a string")),
    };

    info!(url = %url, "Processing PDF");

    match state.orchestrator.process(&url).await? {
        DocumentOutcome::Extracted { text, length, .. } => Ok(Json(ExtractPdfResponse {
            success: true,
            text,
            length,
            url,
        })),
        DocumentOutcome::DownloadFailed { .. } => Err(ApiError::DownloadFailed { url }),
        DocumentOutcome::Unreadable { extracted_length } => Err(ApiError::Unreadable {
            url,
            extracted_length,
        }),
    }
}

pub async fn extract_multiple(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExtractMultipleResponse>, ApiError> {
    let request: ExtractMultipleRequest = parse_body(&body);

    let items: Vec<Value> = match request.urls {
        None | Some(Value::Null) => {
            return Err(ApiError::bad_request(
                "Missing 'urls' parameter (should be array)",
            ))
        }
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ApiError::bad_request("'urls' should be an array")),
    };
    let urls: Vec<String> = items.iter().map(url_text).collect();

    info!(count = urls.len(), "Processing PDF batch");

    let batch = state.orchestrator.process_batch(&urls).await?;

    Ok(Json(ExtractMultipleResponse {
        success: true,
        total_processed: batch.total_processed,
        results: batch
            .results
            .into_iter()
            .zip(items)
            .map(|(outcome, raw)| BatchItemResult {
                url: raw,
                ..BatchItemResult::from(outcome)
            })
            .collect(),
    }))
}

/// Absent, malformed or non-object bodies all read as a request with no fields.
/// Only a JSON object is mapped onto `T`; serde would otherwise accept an
/// array as a tuple-style struct.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    match serde_json::from_slice::<Value>(body) {
        Ok(object @ Value::Object(_)) => serde_json::from_value(object).unwrap_or_else(|e| {
            debug!(error = %e, "Request object has unexpected fields, treating as empty");
            T::default()
        }),
        Ok(other) => {
            debug!(
                kind = json_kind(&other),
                "Request body is not a JSON object, treating as empty"
            );
            T::default()
        }
        Err(e) => {
            debug!(error = %e, "Request body is not JSON, treating as empty");
            T::default()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Address handed to the fetcher. Non-string entries are fetched as their JSON
/// text, which fails to download but keeps their slot in the results.
fn url_text(item: &Value) -> String {
    match item {
        Value::String(url) => url.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bodies_parse_as_empty() {
        for raw in [&b""[..], b"not json", b"[1, 2, 3]", b"42"] {
            let request: ExtractPdfRequest = parse_body(&Bytes::from_static(raw));
            assert!(request.url.is_none());
        }
    }

    #[test]
    fn array_body_is_not_read_as_fields() {
        let request: ExtractPdfRequest =
            parse_body(&Bytes::from_static(br#"["https://x.test/a.pdf"]"#));
        assert!(request.url.is_none());

        let request: ExtractMultipleRequest =
            parse_body(&Bytes::from_static(br#"[["https://x.test/a.pdf"]]"#));
        assert!(request.urls.is_none());
    }

    #[test]
    fn url_field_is_kept_raw() {
        let request: ExtractPdfRequest =
            parse_body(&Bytes::from_static(br#"{"url": 17, "extra": true}"#));
        assert_eq!(request.url, Some(Value::from(17)));
    }

    #[test]
    fn non_string_batch_entries_render_as_json() {
        assert_eq!(url_text(&Value::from("https://a.test/x.pdf")), "https://a.test/x.pdf");
        assert_eq!(url_text(&Value::from(5)), "5");
        assert_eq!(url_text(&Value::Null), "null");
    }
}
