//! AI provider implementations

pub mod gemini;
pub mod local;
pub mod openai;

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::bridge::{ExplainConfig, ExplainProvider, ProviderKind};
use super::error::ExplainError;

/// Factory function to create AI providers
pub fn create_provider(config: &ExplainConfig) -> Result<Box<dyn ExplainProvider>, ExplainError> {
    match config.provider {
        ProviderKind::Gemini => Ok(Box::new(gemini::GeminiProvider::new(config)?)),
        ProviderKind::OpenAI => Ok(Box::new(openai::OpenAIProvider::new(config)?)),
        ProviderKind::Local => Ok(Box::new(local::LocalProvider::new())),
    }
}

/// Key from config, rejecting blanks.
fn require_key(config: &ExplainConfig) -> Result<String, ExplainError> {
    config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ExplainError::MissingCredential {
            provider: config.provider.to_string(),
        })
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, ExplainError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ExplainError::Transport(e.to_string()))
}

fn classify(error: reqwest::Error, timeout: Duration) -> ExplainError {
    if error.is_timeout() {
        ExplainError::Timeout(timeout)
    } else {
        ExplainError::Transport(error.to_string())
    }
}

/// Send a prepared request and decode a JSON body. Non-success statuses
/// become `Upstream` with the response text as message.
async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<T, ExplainError> {
    let response = request.send().await.map_err(|e| classify(e, timeout))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.map_err(|e| classify(e, timeout))?;
        return Err(ExplainError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await.map_err(|e| classify(e, timeout))?;
    serde_json::from_str(&body).map_err(|e| ExplainError::MalformedResponse(e.to_string()))
}
