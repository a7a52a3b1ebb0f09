//! Error taxonomy for upload validation and the descriptor service.
//!
//! Every variant surfaces as visible UI state and is locally recoverable:
//! validation failures by re-selecting a file, service failures by
//! resubmitting. The messages are user-facing and shown verbatim.

use thiserror::Error;

/// A selected CSV file was rejected before submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload a CSV file")]
    NotCsv,

    #[error("File size exceeds the maximum limit")]
    TooLarge,

    #[error("CSV file is empty")]
    Empty,

    #[error("CSV file must contain a \"SMILES\" column")]
    MissingSmilesColumn,

    #[error("CSV file exceeds the limit of 50,000 entries")]
    TooManyRows,

    #[error("Failed to read the file: {reason}")]
    Unreadable { reason: String },
}

/// A calculation request failed, or produced nothing to show.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("API error: {status}")]
    Status { status: u16 },

    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Failed to parse API response")]
    MalformedResponse,

    /// The service ran but returned an empty (or non-array) result. This is
    /// a distinct user message, not a hard failure.
    #[error("No molecules pass the filter")]
    EmptyResult,
}

impl ServiceError {
    /// Whether this is the "ran but nothing matched" condition rather than
    /// an actual failure.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult)
    }
}
