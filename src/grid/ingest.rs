//! Chunked transfer of service rows into the dataset.
//!
//! The service can return far more rows than the grid wants to hold, and
//! merging them all at once would starve the event loop. Ingestion therefore
//! caps the transfer at [`ROW_CAP`] rows and splits it into [`BATCH_SIZE`]
//! increments; the worker emits each increment as its own message so the UI
//! thread renders and handles input between merges.

use serde_json::Value;

use super::dataset::Row;
use crate::error::ServiceError;

/// Rows transferred per increment.
pub const BATCH_SIZE: usize = 100;

/// Maximum rows resident in the grid, for responsiveness.
pub const ROW_CAP: usize = 1000;

/// Decode a service response body into result rows.
///
/// Invalid JSON is a malformed response; valid JSON that is not an array is
/// treated the same as an empty array: the service ran but nothing matched.
pub fn parse_rows(body: &str) -> Result<Vec<Row>, ServiceError> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| ServiceError::MalformedResponse)?;
    let Value::Array(entries) = value else {
        return Err(ServiceError::EmptyResult);
    };
    if entries.is_empty() {
        return Err(ServiceError::EmptyResult);
    }
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(row) => row,
            _ => Row::new(),
        })
        .collect())
}

/// A capped, batched ingestion plan: the column order plus the row
/// increments to deliver, in order.
#[derive(Debug)]
pub struct IngestPlan {
    pub columns: Vec<String>,
    pub batches: Vec<Vec<Row>>,
}

impl IngestPlan {
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }
}

/// Build the ingestion plan for a parsed result set. Column names come from
/// the first row's own keys, in order.
pub fn plan(mut rows: Vec<Row>) -> Result<IngestPlan, ServiceError> {
    if rows.is_empty() {
        return Err(ServiceError::EmptyResult);
    }

    let columns: Vec<String> = rows[0].keys().cloned().collect();
    rows.truncate(ROW_CAP);

    let mut batches = Vec::with_capacity(rows.len().div_ceil(BATCH_SIZE));
    let mut remaining = rows;
    while !remaining.is_empty() {
        let rest = remaining.split_off(remaining.len().min(BATCH_SIZE));
        batches.push(remaining);
        remaining = rest;
    }

    Ok(IngestPlan { columns, batches })
}
