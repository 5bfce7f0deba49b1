use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::SuggestError;
use crate::suggest::ChatCompletion;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Hard cap on the completion size; suggestions are short display text.
pub const MAX_SUGGESTION_TOKENS: u32 = 500;

const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Chat-completion client for the OpenAI API. The credential is supplied
/// per call and held only by the caller, never by the client.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(model: impl Into<String>) -> Self {
        OpenAiClient {
            client: Client::new(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Build a client from application configuration. The request timeout
    /// applies whether or not the endpoint is overridden.
    pub fn from_config(config: &AppConfig) -> Result<Self, SuggestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(OpenAiClient {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            model: config.model.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OpenAiClient {
            client: Client::new(),
            base_url,
            model,
        }
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        OpenAiClient::new(DEFAULT_MODEL)
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<Option<String>, SuggestError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "max_tokens": MAX_SUGGESTION_TOKENS
            }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        debug!("{:?}", body);

        // Prefer the service's own error message verbatim when it sent one.
        if let Some(message) = body["error"]["message"].as_str() {
            return Err(SuggestError::Remote(message.to_string()));
        }
        if !status.is_success() {
            return Err(SuggestError::Remote(format!(
                "Suggestion request failed with status {status}"
            )));
        }

        match body["choices"][0]["message"]["content"].as_str() {
            Some(content) if !content.is_empty() => Ok(Some(content.to_string())),
            _ => Ok(None),
        }
    }
}
