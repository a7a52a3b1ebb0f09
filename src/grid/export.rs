//! CSV serialisation of the filtered view, plus the local file save.
//!
//! Cells are JSON-stringified so embedded commas and quotes survive a
//! round-trip. The one asymmetry is deliberate: a column literally named
//! "Structure" exports the bare base64 payload of its image data URIs,
//! while any other image-bearing column keeps the full URI.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use super::dataset::{Dataset, STRUCTURE_COLUMN};

/// Filename used when the prompt is left empty.
pub const DEFAULT_FILENAME: &str = "results.csv";

/// The base64 payload of a data URI, with the scheme/MIME prefix stripped.
#[must_use]
pub fn data_uri_payload(uri: &str) -> Option<&str> {
    uri.split_once(',').map(|(_, payload)| payload)
}

/// Serialise the given view (filtered, not paginated) to CSV text: one
/// header row of column names, then one row per entry with JSON-stringified
/// values in the same column order. Null cells export as an empty string.
#[must_use]
pub fn csv_text(dataset: &Dataset, view: &[usize], columns: &[String]) -> String {
    let mut lines = Vec::with_capacity(view.len() + 1);
    lines.push(columns.join(","));

    for &index in view {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                let value = dataset.cell(index, column).unwrap_or(&Value::Null);
                export_cell(column, value)
            })
            .collect();
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

fn export_cell(column: &str, value: &Value) -> String {
    if column == STRUCTURE_COLUMN
        && let Value::String(text) = value
        && text.starts_with("data:image")
    {
        let payload = data_uri_payload(text).unwrap_or("");
        return encode(&Value::String(payload.to_string()));
    }

    match value {
        Value::Null => encode(&Value::String(String::new())),
        other => encode(other),
    }
}

fn encode(value: &Value) -> String {
    // serde_json can only fail on non-string map keys; cells are scalars.
    serde_json::to_string(value).unwrap_or_default()
}

/// Resolve the interactive filename prompt: empty input falls back to the
/// default, and a missing `.csv` extension is appended.
#[must_use]
pub fn resolve_filename(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }
    if trimmed.ends_with(".csv") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.csv")
    }
}

/// Save exported CSV text next to the user.
pub fn write_csv(path: &Path, text: &str) -> io::Result<()> {
    fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::grid::dataset::Row;

    fn dataset_with_structures() -> Dataset {
        let rows: Vec<Row> = vec![
            [
                ("SMILES".to_string(), json!("CCO")),
                ("MW".to_string(), json!(46.07)),
                (
                    "Structure".to_string(),
                    json!("data:image/png;base64,iVBORw0KGgo="),
                ),
            ]
            .into_iter()
            .collect(),
            [
                ("SMILES".to_string(), json!("CCC")),
                ("MW".to_string(), Value::Null),
                ("Structure".to_string(), json!("no depiction")),
            ]
            .into_iter()
            .collect(),
        ];
        Dataset::from_rows(rows)
    }

    #[test]
    fn header_reproduces_display_columns_in_order() {
        let dataset = dataset_with_structures();
        let columns = dataset.display_columns();
        let text = csv_text(&dataset, &[0, 1], &columns);
        assert_eq!(text.lines().next(), Some("SMILES,MW,Structure"));
    }

    #[test]
    fn structure_cells_export_the_bare_base64_payload() {
        let dataset = dataset_with_structures();
        let columns = dataset.display_columns();
        let text = csv_text(&dataset, &[0], &columns);
        let row = text.lines().nth(1).expect("data row");
        assert_eq!(row, "\"CCO\",46.07,\"iVBORw0KGgo=\"");
    }

    #[test]
    fn non_uri_structure_cells_export_verbatim() {
        let dataset = dataset_with_structures();
        let columns = dataset.display_columns();
        let text = csv_text(&dataset, &[1], &columns);
        let row = text.lines().nth(1).expect("data row");
        assert_eq!(row, "\"CCC\",\"\",\"no depiction\"");
    }

    #[test]
    fn export_respects_the_given_view_order() {
        let dataset = dataset_with_structures();
        let columns = vec!["SMILES".to_string()];
        let text = csv_text(&dataset, &[1, 0], &columns);
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(rows, vec!["\"CCC\"", "\"CCO\""]);
    }

    #[test]
    fn data_uri_prefix_stripping() {
        assert_eq!(
            data_uri_payload("data:image/png;base64,AAAA"),
            Some("AAAA")
        );
        assert_eq!(data_uri_payload("no comma"), None);
    }

    #[test]
    fn filename_prompt_fallbacks() {
        assert_eq!(resolve_filename(""), "results.csv");
        assert_eq!(resolve_filename("   "), "results.csv");
        assert_eq!(resolve_filename("mw-report"), "mw-report.csv");
        assert_eq!(resolve_filename("mw-report.csv"), "mw-report.csv");
    }

    #[test]
    fn written_file_round_trips() {
        let dataset = dataset_with_structures();
        let columns = dataset.display_columns();
        let text = csv_text(&dataset, &[0, 1], &columns);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(resolve_filename("export"));
        write_csv(&path, &text).expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), text);
    }
}
