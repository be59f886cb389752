//! Structured error types for hotline
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

/// Failure while reading the profiler's text report.
///
/// Every variant carries the 1-based position of the offending line in the
/// input and its content, so the caller can point at the exact spot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {position}: no function name in header {content:?}")]
    MissingFunctionName { position: usize, content: String },

    #[error("line {position}: column header has no `Line Contents` label: {content:?}")]
    MissingCodeColumn { position: usize, content: String },

    #[error("line {position}: expected a line number in {content:?}")]
    MissingLineNumber { position: usize, content: String },

    #[error("line {position}: expected 1 or 5 numeric fields, found {found} in {content:?}")]
    UnexpectedFieldCount { position: usize, found: usize, content: String },

    #[error("line {position}: invalid {field} {value:?} in {content:?}")]
    InvalidNumber { position: usize, field: &'static str, value: String, content: String },
}

impl ParseError {
    /// 1-based position of the offending line in the profiler output
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::MissingFunctionName { position, .. }
            | Self::MissingCodeColumn { position, .. }
            | Self::MissingLineNumber { position, .. }
            | Self::UnexpectedFieldCount { position, .. }
            | Self::InvalidNumber { position, .. } => *position,
        }
    }

    /// The offending line as it appeared in the profiler output
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::MissingFunctionName { content, .. }
            | Self::MissingCodeColumn { content, .. }
            | Self::MissingLineNumber { content, .. }
            | Self::UnexpectedFieldCount { content, .. }
            | Self::InvalidNumber { content, .. } => content,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No data to analyze: function {0} has no profiled lines")]
    NoData(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
