//! Explanation requester: provider trait, configuration and the front door

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ExplainError;
use crate::prompt::explain_prompt;
use crate::providers::create_provider;

/// Default deadline for a single model call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which backend answers explanation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint
    OpenAI,
    /// Offline heuristic summary, no network
    Local,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Local => "local",
        }
    }

    pub fn needs_credential(&self) -> bool {
        !matches!(self, ProviderKind::Local)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ExplainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAI),
            "local" | "offline" => Ok(ProviderKind::Local),
            _ => Err(ExplainError::UnknownProvider(s.to_string())),
        }
    }
}

/// Everything needed to construct a provider. Passed in explicitly; nothing
/// here is read from the environment.
#[derive(Debug, Clone)]
pub struct ExplainConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    /// Model override; each provider has its own default.
    pub model: Option<String>,
    /// Base URL override, mainly for proxies and tests.
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            model: None,
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ExplainConfig {
    pub fn local() -> Self {
        Self {
            provider: ProviderKind::Local,
            ..Self::default()
        }
    }
}

/// Raw code plus the user's optional extra instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub code: String,
    pub instruction: Option<String>,
}

impl ExplainRequest {
    pub fn new(code: impl Into<String>, instruction: Option<&str>) -> Self {
        Self {
            code: code.into(),
            instruction: instruction.map(str::to_string),
        }
    }

    /// The single natural-language request sent to the model.
    pub fn prompt(&self) -> String {
        explain_prompt(&self.code, self.instruction.as_deref())
    }
}

/// The model's answer, returned verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub provider: String,
    pub tokens_used: Option<u32>,
}

/// Backend that can answer an explanation request.
#[async_trait::async_trait]
pub trait ExplainProvider: Send + Sync {
    /// Send the request and return the model's text.
    async fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ExplainError>;

    /// Get provider name
    fn name(&self) -> &str;
}

/// Front door for explanation requests.
pub struct Explainer {
    provider: Box<dyn ExplainProvider>,
}

impl fmt::Debug for Explainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Explainer")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl Explainer {
    pub fn new(provider: Box<dyn ExplainProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &ExplainConfig) -> Result<Self, ExplainError> {
        Ok(Self::new(create_provider(config)?))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Explain `code`, appending `instruction` when given. Blank code is
    /// rejected before any network traffic.
    pub async fn explain(&self, code: &str, instruction: Option<&str>) -> Result<Explanation, ExplainError> {
        if code.trim().is_empty() {
            return Err(ExplainError::EmptyCode);
        }

        let request = ExplainRequest::new(code, instruction);
        tracing::debug!(
            "Requesting explanation from {} ({} chars of code)",
            self.provider.name(),
            code.len()
        );

        match self.provider.explain(&request).await {
            Ok(explanation) => Ok(explanation),
            Err(e) => {
                tracing::warn!("Explanation via {} failed: {}", self.provider.name(), e);
                Err(e)
            }
        }
    }
}
