//! Errors raised by the data model

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown language: {0:?} (expected one of Python, JavaScript, Java, C++, C#)")]
    UnknownLanguage(String),
}
