//! Immutable snapshot of a descriptor result table.
//!
//! A [`Dataset`] is created once per successful calculation request and
//! replaced wholesale by the next one; rows are never mutated after
//! ingestion. Column order is the key order of the first result row.

use serde_json::Value;

/// A single result row, keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// Column name used for inline structure depictions.
pub const STRUCTURE_COLUMN: &str = "Structure";

/// Ordered result rows plus their column names.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given column order.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a dataset from already-materialised rows, deriving the column
    /// order from the first row. Intended for tests and small fixtures.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        let mut dataset = Self::new(columns);
        dataset.push_rows(rows);
        dataset
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a batch of rows, normalising each one to exactly the dataset's
    /// column set: missing values become null, unknown keys are dropped.
    pub fn push_rows(&mut self, batch: Vec<Row>) {
        for mut row in batch {
            row.retain(|key, _| self.columns.iter().any(|column| column == key));
            for column in &self.columns {
                if !row.contains_key(column) {
                    row.insert(column.clone(), Value::Null);
                }
            }
            self.rows.push(row);
        }
    }

    /// Columns shown to the user: everything except fingerprint fields.
    #[must_use]
    pub fn display_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| !column.to_lowercase().contains("fingerprint"))
            .cloned()
            .collect()
    }

    /// Look up a cell by row index and column name.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|row| row.get(column))
    }
}

/// String form of a cell, as used by filtering and sorting. Null renders as
/// the empty string; compound values fall back to their JSON text.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Whether a cell holds an inline image data URI.
#[must_use]
pub fn is_image_uri(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.starts_with("data:image"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn display_columns_exclude_fingerprint_fields() {
        let dataset = Dataset::new(vec![
            "SMILES".into(),
            "Morgan Fingerprint".into(),
            "MW".into(),
            "fingerprint_bits".into(),
        ]);
        assert_eq!(dataset.display_columns(), vec!["SMILES", "MW"]);
    }

    #[test]
    fn push_rows_fills_missing_cells_with_null() {
        let mut dataset = Dataset::new(vec!["SMILES".into(), "MW".into()]);
        dataset.push_rows(vec![row(&[("SMILES", json!("CCO"))])]);
        assert_eq!(dataset.cell(0, "MW"), Some(&Value::Null));
    }

    #[test]
    fn push_rows_drops_unknown_keys() {
        let mut dataset = Dataset::new(vec!["SMILES".into()]);
        dataset.push_rows(vec![row(&[
            ("SMILES", json!("CCO")),
            ("stray", json!(1)),
        ])]);
        assert_eq!(dataset.cell(0, "stray"), None);
    }

    #[test]
    fn cell_text_renders_scalars() {
        assert_eq!(cell_text(&json!("CCO")), "CCO");
        assert_eq!(cell_text(&json!(46.07)), "46.07");
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!(true)), "true");
    }

    #[test]
    fn image_uri_detection() {
        assert!(is_image_uri(&json!("data:image/png;base64,iVBOR")));
        assert!(!is_image_uri(&json!("CCO")));
        assert!(!is_image_uri(&Value::Null));
    }
}
