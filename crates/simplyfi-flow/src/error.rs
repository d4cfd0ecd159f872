//! Errors raised while turning source text into graphs

use simplyfi_core::Language;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// The input does not parse in the target language. No graph is produced.
    #[error("the provided code does not appear to be valid {language} syntax (line {line}, column {column})")]
    InvalidSyntax {
        language: Language,
        line: u32,
        column: u32,
    },

    #[error("syntax trees are only available for Python, not {0}")]
    UnsupportedLanguage(Language),

    #[error("failed to load the {language} grammar: {message}")]
    Grammar { language: Language, message: String },

    #[error("the parser gave up before producing a tree")]
    ParseAborted,
}

impl FlowError {
    pub fn is_invalid_syntax(&self) -> bool {
        matches!(self, FlowError::InvalidSyntax { .. })
    }
}
