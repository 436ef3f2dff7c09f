//! OCR.space client for scanned FIR documents.
//!
//! Provides the `TextSource` trait and its OCR.space implementation.
//! Image-to-text conversion is strictly a pre-step: the extracted text
//! is handed to the analysis engine, which itself never performs I/O.
//! The client enforces its own request timeout.

use std::future::Future;
use thiserror::Error;

/// Errors from text extraction.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("OCR service reported an error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No text found in document")]
    NoText,
}

/// Trait for sources that turn an uploaded document into text.
///
/// This abstraction keeps the engine independent of how text was
/// obtained (plain file read, PDF extraction, remote OCR).
pub trait TextSource {
    /// Extract text from raw document bytes.
    fn extract_text(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> impl Future<Output = Result<String, OcrError>> + Send;

    /// Get the source name for logging.
    fn name(&self) -> &'static str;
}

/// OCR.space client configuration.
#[derive(Debug, Clone)]
pub struct OcrSpaceConfig {
    /// Base URL for the OCR.space API
    pub base_url: String,
    /// API key ("helloworld" is the public demo key)
    pub api_key: String,
    /// Document language
    pub language: String,
    /// OCR engine number; engine 2 handles handwriting better
    pub engine: u8,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OcrSpaceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.ocr.space".to_string(),
            api_key: "helloworld".to_string(),
            language: "eng".to_string(),
            engine: 2,
            timeout_secs: 15,
        }
    }
}

/// OCR.space backend.
pub struct OcrSpaceClient {
    config: OcrSpaceConfig,
    client: reqwest::Client,
}

impl OcrSpaceClient {
    /// Create a new OCR.space client.
    pub fn new(config: OcrSpaceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Pull the parsed text out of an OCR.space response body.
    fn parse_response(&self, response: serde_json::Value) -> Result<String, OcrError> {
        if response
            .get("IsErroredOnProcessing")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            let message = match response.get("ErrorMessage") {
                Some(serde_json::Value::Array(items)) => items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
                Some(serde_json::Value::String(s)) => s.clone(),
                _ => "unknown error".to_string(),
            };
            return Err(OcrError::Api(message));
        }

        let text = response
            .get("ParsedResults")
            .and_then(|r| r.as_array())
            .and_then(|r| r.first())
            .and_then(|r| r.get("ParsedText"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| OcrError::ParseError("Missing ParsedResults".to_string()))?;

        if text.trim().is_empty() {
            return Err(OcrError::NoText);
        }

        Ok(text.to_string())
    }
}

impl TextSource for OcrSpaceClient {
    async fn extract_text(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, OcrError> {
        tracing::debug!(file = %file_name, size = bytes.len(), "submitting document to OCR.space");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("apikey", self.config.api_key.clone())
            .text("language", self.config.language.clone())
            .text("OCREngine", self.config.engine.to_string())
            .text("isOverlayRequired", "false");

        let response = self
            .client
            .post(format!("{}/parse/image", self.config.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| OcrError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Api(format!("HTTP {}: {}", status, body)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OcrError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    fn name(&self) -> &'static str {
        "ocr.space"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_successful_response() {
        let client = OcrSpaceClient::new(OcrSpaceConfig::default());
        let response = json!({
            "IsErroredOnProcessing": false,
            "ParsedResults": [{ "ParsedText": "FIR No. 42 u/s 302" }]
        });
        assert_eq!(client.parse_response(response).unwrap(), "FIR No. 42 u/s 302");
    }

    #[test]
    fn test_parse_api_error() {
        let client = OcrSpaceClient::new(OcrSpaceConfig::default());
        let response = json!({
            "IsErroredOnProcessing": true,
            "ErrorMessage": ["File size too large"]
        });
        match client.parse_response(response) {
            Err(OcrError::Api(message)) => assert_eq!(message, "File size too large"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_text() {
        let client = OcrSpaceClient::new(OcrSpaceConfig::default());
        let response = json!({
            "ParsedResults": [{ "ParsedText": "  \n" }]
        });
        assert!(matches!(client.parse_response(response), Err(OcrError::NoText)));
    }

    #[test]
    fn test_parse_missing_results() {
        let client = OcrSpaceClient::new(OcrSpaceConfig::default());
        let response = json!({ "IsErroredOnProcessing": false });
        assert!(matches!(
            client.parse_response(response),
            Err(OcrError::ParseError(_))
        ));
    }
}
