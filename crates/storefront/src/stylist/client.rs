//! Gemini API client for one-shot text generation.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::StylistConfig;

use super::error::{ApiErrorResponse, StylistError};
use super::types::{GenerateRequest, GenerateResponse, GenerationConfig};

const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 256;
const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Gemini API client.
///
/// Sends a single prompt to `models/{model}:generateContent` and returns the
/// generated text.
#[derive(Clone)]
pub struct StylistClient {
    inner: Arc<StylistClientInner>,
}

struct StylistClientInner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl StylistClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the key contains invalid
    /// header characters, or the HTTP client cannot be built.
    pub fn new(config: &StylistConfig) -> Result<Self, StylistError> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or(StylistError::MissingCredential)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| StylistError::InvalidCredential)?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base.as_str().trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            inner: Arc::new(StylistClientInner {
                client,
                endpoint,
                model: config.model.clone(),
            }),
        })
    }

    /// Generate text for `prompt`.
    ///
    /// Returns the concatenated text of the first candidate, untrimmed. An
    /// empty string means the model answered with no text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with an error
    /// status, or the body cannot be parsed.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    pub async fn generate(&self, prompt: String) -> Result<String, StylistError> {
        let request = GenerateRequest::from_prompt(
            prompt,
            Some(GenerationConfig {
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
                temperature: DEFAULT_TEMPERATURE,
            }),
        );

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| StylistError::Parse(format!("Failed to parse response: {e}")))?;

        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "stylist response received"
            );
        }

        Ok(parsed.text())
    }

    /// Map an error status code to a [`StylistError`].
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> StylistError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return StylistError::RateLimited;
        }

        match response.text().await {
            Ok(body) => {
                let message = serde_json::from_str::<ApiErrorResponse>(&body)
                    .map_or(body, |api_error| api_error.error.message);
                StylistError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
            Err(e) => StylistError::Http(e),
        }
    }
}
