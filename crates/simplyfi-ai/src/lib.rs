//! AI code explanations for Simplyfi
//!
//! This crate turns pasted code plus an optional instruction into a single
//! natural-language request, forwards it to a hosted language model, and
//! hands back the model's text. No retries, no caching.

pub mod bridge;
pub mod error;
pub mod prompt;
pub mod providers;


pub use bridge::*;
pub use error::ExplainError;
