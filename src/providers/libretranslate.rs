use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::{LanguageEntry, TranslationBackend, UNDETERMINED_LANGUAGE};

/// Client for a LibreTranslate-compatible translation server
///
/// Speaks the form-encoded `/detect` and `/translate` endpoints. Server
/// errors and network failures are retried with exponential backoff;
/// client errors are returned immediately.
#[derive(Debug)]
pub struct LibreTranslate {
    /// Base URL of the server, without trailing slash
    base_url: String,
    /// Optional API key appended to every request
    api_key: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Character budget per translate call
    max_chunk_chars: usize,
}

/// One entry of the `/detect` response array
#[derive(Debug, Deserialize)]
struct Detection {
    /// Detected language code
    language: String,
    /// Detection confidence, 0-100
    #[serde(default)]
    #[allow(dead_code)]
    confidence: f64,
}

/// Response body of the `/translate` endpoint
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslate {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_config(base_url, api_key, 5000, 30, 3, 1000)
    }

    /// Create a new client with explicit limits
    pub fn with_config(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        max_chunk_chars: usize,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
            max_chunk_chars,
        }
    }

    /// POST a form to an endpoint with retry on server/network errors
    async fn post_form(
        &self,
        path: &str,
        mut form: Vec<(&'static str, String)>,
    ) -> Result<String, ProviderError> {
        if !self.api_key.is_empty() {
            form.push(("api_key", self.api_key.clone()));
        }
        let url = format!("{}{}", self.base_url, path);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            let response_result = self.client.post(&url).form(&form).send().await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().await.map_err(|e| {
                            ProviderError::ParseError(format!(
                                "Failed to read response body from {}: {}",
                                url, e
                            ))
                        });
                    }

                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());

                    if status.is_server_error() {
                        // Server error - can retry
                        error!(
                            "Backend error ({}) from {}: {} - attempt {}/{}",
                            status,
                            url,
                            message,
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    } else {
                        // Client error - don't retry
                        error!("Backend error ({}) from {}: {}", status, url, message);
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    error!(
                        "Backend network error for {}: {} - attempt {}/{}",
                        url,
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Request to {} failed after {} attempts",
                url,
                self.max_retries + 1
            ))
        }))
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslate {
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Ok(UNDETERMINED_LANGUAGE.to_string());
        }

        let body = self
            .post_form("/detect", vec![("q", text.to_string())])
            .await?;

        let detections: Vec<Detection> = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid /detect response: {}", e)))?;

        match detections.first() {
            Some(top) => {
                debug!("Detected source language: {}", top.language);
                Ok(top.language.clone())
            }
            None => Ok(UNDETERMINED_LANGUAGE.to_string()),
        }
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let body = self
            .post_form(
                "/translate",
                vec![
                    ("q", text.to_string()),
                    ("source", source.to_string()),
                    ("target", target.to_string()),
                    ("format", "text".to_string()),
                ],
            )
            .await?;

        let response: TranslateResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::ParseError(format!("Invalid /translate response: {}", e))
        })?;

        if response.translated_text.is_empty() && !text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(
                "backend returned an empty translation".to_string(),
            ));
        }

        Ok(response.translated_text)
    }

    async fn list_languages(&self) -> Result<Vec<LanguageEntry>, ProviderError> {
        let url = format!("{}/languages", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<LanguageEntry>>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Invalid /languages response: {}", e)))
    }

    fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }
}
