//! Crate-level error types.

use std::fmt;

/// Errors produced by the folio-motion crate.
#[derive(Debug)]
pub enum MotionError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Portfolio content could not be parsed.
    ContentParse(String),
    /// Portfolio content parsed but failed validation.
    InvalidContent(Vec<String>),
    /// JSON trace serialization failure.
    Trace(String),
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::ContentParse(msg) => {
                write!(f, "content parse error: {msg}")
            }
            Self::InvalidContent(errors) => {
                write!(f, "invalid content ({} errors)", errors.len())?;
                if let Some(first) = errors.first() {
                    write!(f, ": {first}")?;
                }
                Ok(())
            }
            Self::Trace(msg) => write!(f, "trace error: {msg}"),
        }
    }
}

impl std::error::Error for MotionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MotionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
