//! Per-column substring filtering over the dataset.
//!
//! Filtering is a pure function from (dataset, filter state) to an index
//! view; keystrokes are held back by [`FilterDebounce`] for a quiet period
//! before the visible state commits, so the view is not recomputed on every
//! character.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::dataset::{Dataset, cell_text};

/// Quiet period before a pending filter edit commits.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Active per-column filter strings. An absent or empty entry imposes no
/// constraint on its column.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    filters: HashMap<String, String>,
}

impl FilterState {
    /// Set the filter for a column; an empty string removes the entry.
    pub fn set(&mut self, column: impl Into<String>, text: impl Into<String>) {
        let column = column.into();
        let text = text.into();
        if text.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, text);
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.filters.get(column).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }
}

/// Produce the indices of rows that pass every active column filter, in
/// dataset order. Matching is a case-insensitive substring test against the
/// cell's string form; null cells never match an active filter.
#[must_use]
pub fn apply(dataset: &Dataset, display_columns: &[String], filters: &FilterState) -> Vec<usize> {
    if filters.is_empty() {
        return (0..dataset.len()).collect();
    }

    let active: Vec<(&String, String)> = display_columns
        .iter()
        .filter_map(|column| {
            filters
                .get(column)
                .map(|text| (column, text.to_lowercase()))
        })
        .collect();

    (0..dataset.len())
        .filter(|&index| {
            active.iter().all(|(column, needle)| {
                dataset
                    .cell(index, column)
                    .is_some_and(|value| cell_text(value).to_lowercase().contains(needle))
            })
        })
        .collect()
}

/// A single pending filter edit. Each new keystroke replaces the pending
/// edit and restarts the quiet period; only on expiry does the visible
/// [`FilterState`] change.
#[derive(Debug, Default)]
pub struct FilterDebounce {
    pending: Option<PendingEdit>,
}

#[derive(Debug)]
struct PendingEdit {
    column: String,
    text: String,
    deadline: Instant,
}

impl FilterDebounce {
    /// Record a keystroke against a column, restarting the quiet period.
    pub fn note(&mut self, column: impl Into<String>, text: impl Into<String>, now: Instant) {
        self.pending = Some(PendingEdit {
            column: column.into(),
            text: text.into(),
            deadline: now + DEBOUNCE,
        });
    }

    /// Take the pending edit if its quiet period has elapsed.
    pub fn take_ready(&mut self, now: Instant) -> Option<(String, String)> {
        if self.pending.as_ref().is_some_and(|edit| now >= edit.deadline) {
            return self.flush();
        }
        None
    }

    /// Commit the pending edit immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<(String, String)> {
        self.pending.take().map(|edit| (edit.column, edit.text))
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
