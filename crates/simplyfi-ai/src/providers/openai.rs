//! OpenAI provider implementation

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::super::bridge::{ExplainConfig, ExplainProvider, ExplainRequest, Explanation};
use super::super::error::ExplainError;
use super::super::prompt::EXPLAIN_SYSTEM_PROMPT;
use super::{build_client, require_key, send_json};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAIProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl OpenAIProvider {
    pub fn new(config: &ExplainConfig) -> Result<Self, ExplainError> {
        Ok(Self {
            client: build_client(config.timeout)?,
            api_key: require_key(config)?,
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: config.timeout,
        })
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    total_tokens: u32,
}

#[async_trait::async_trait]
impl ExplainProvider for OpenAIProvider {
    async fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ExplainError> {
        let openai_request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: EXPLAIN_SYSTEM_PROMPT.to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: request.prompt(),
                },
            ],
            temperature: 0.3,
            max_tokens: 800,
        };

        let response: OpenAIResponse = send_json(
            self.client
                .post(format!("{}/chat/completions", self.endpoint.trim_end_matches('/')))
                .bearer_auth(&self.api_key)
                .json(&openai_request),
            self.timeout,
        )
        .await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ExplainError::MalformedResponse("no choices in OpenAI response".to_string()))?;

        Ok(Explanation {
            text,
            provider: self.name().to_string(),
            tokens_used: response.usage.map(|u| u.total_tokens),
        })
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}
