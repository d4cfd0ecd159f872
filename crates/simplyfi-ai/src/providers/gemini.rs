//! Google Gemini provider implementation

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::super::bridge::{ExplainConfig, ExplainProvider, ExplainRequest, Explanation};
use super::super::error::ExplainError;
use super::{build_client, require_key, send_json};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiProvider {
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

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u32>,
}

#[async_trait::async_trait]
impl ExplainProvider for GeminiProvider {
    async fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ExplainError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt(),
                }],
            }],
        };

        let response: GenerateResponse = send_json(
            self.client
                .post(self.url())
                .header("x-goog-api-key", &self.api_key)
                .json(&body),
            self.timeout,
        )
        .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ExplainError::MalformedResponse("no candidate text in Gemini response".to_string()))?;

        Ok(Explanation {
            text,
            provider: self.name().to_string(),
            tokens_used: response.usage_metadata.and_then(|u| u.total_token_count),
        })
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
