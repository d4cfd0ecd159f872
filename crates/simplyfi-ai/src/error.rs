//! Failures of the explanation round trip

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("no API key configured for the {provider} provider")]
    MissingCredential { provider: String },

    #[error("the language model did not answer within {0:?}")]
    Timeout(Duration),

    #[error("the language model API returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("could not reach the language model API: {0}")]
    Transport(String),

    #[error("unexpected response from the language model API: {0}")]
    MalformedResponse(String),

    #[error("no code was provided to explain")]
    EmptyCode,

    #[error("unknown AI provider: {0:?} (expected gemini, openai or local)")]
    UnknownProvider(String),
}

impl ExplainError {
    /// Whether the failure lies with the remote service or its credentials
    /// rather than with the caller's input.
    pub fn is_upstream_unavailable(&self) -> bool {
        !matches!(self, ExplainError::EmptyCode | ExplainError::UnknownProvider(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ExplainError::Timeout(_))
    }
}
