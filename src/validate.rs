//! Upload checks applied before a CSV file is accepted.
//!
//! The SMILES column check is purely a header-name test; nothing here parses
//! molecular structures.

use std::fs;
use std::path::Path;

use crate::error::ValidationError;

/// Upper bound on the upload, matching the service's limit.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum data rows, excluding the header line.
pub const MAX_DATA_ROWS: usize = 50_000;

/// Validate a candidate CSV file: extension, size, a case-insensitive
/// "SMILES" header column, and the row limit. The first failed check wins.
pub fn validate_csv(path: &Path) -> Result<(), ValidationError> {
    if !path
        .to_string_lossy()
        .ends_with(".csv")
    {
        return Err(ValidationError::NotCsv);
    }

    let metadata = fs::metadata(path).map_err(|err| ValidationError::Unreadable {
        reason: err.to_string(),
    })?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge);
    }

    let content = fs::read_to_string(path).map_err(|err| ValidationError::Unreadable {
        reason: err.to_string(),
    })?;
    validate_content(&content)
}

/// Header and row-count checks over already-read file content.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    let mut lines = content.lines();
    let Some(header) = lines.next() else {
        return Err(ValidationError::Empty);
    };

    let has_smiles = header
        .split(',')
        .map(|column| strip_quotes(column.trim()))
        .any(|column| column.eq_ignore_ascii_case("SMILES"));
    if !has_smiles {
        return Err(ValidationError::MissingSmilesColumn);
    }

    if lines.count() > MAX_DATA_ROWS {
        return Err(ValidationError::TooManyRows);
    }

    Ok(())
}

/// Strip one pair of surrounding double quotes, as CSV headers often carry.
fn strip_quotes(column: &str) -> &str {
    column
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(column)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create fixture");
        file.write_all(content.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn accepts_a_well_formed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, "molecules.csv", "SMILES,MW\nCCO,46.07\n");
        assert_eq!(validate_csv(&path), Ok(()));
    }

    #[test]
    fn rejects_non_csv_extensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, "molecules.txt", "SMILES\nCCO\n");
        assert_eq!(validate_csv(&path), Err(ValidationError::NotCsv));
    }

    #[test]
    fn rejects_oversize_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut content = String::from("SMILES\n");
        content.push_str(&"C".repeat(MAX_FILE_SIZE as usize + 1));
        let path = write_fixture(&dir, "big.csv", &content);
        assert_eq!(validate_csv(&path), Err(ValidationError::TooLarge));
    }

    #[test]
    fn smiles_header_is_case_insensitive_and_may_be_quoted() {
        assert_eq!(validate_content("smiles,mw\nCCO,46\n"), Ok(()));
        assert_eq!(validate_content("\"Smiles\",MW\nCCO,46\n"), Ok(()));
        assert_eq!(validate_content(" SMILES ,MW\nCCO,46\n"), Ok(()));
    }

    #[test]
    fn missing_smiles_column_is_rejected() {
        assert_eq!(
            validate_content("name,MW\nethanol,46\n"),
            Err(ValidationError::MissingSmilesColumn)
        );
    }

    #[test]
    fn empty_content_is_rejected() {
        assert_eq!(validate_content(""), Err(ValidationError::Empty));
    }

    #[test]
    fn row_limit_counts_data_rows_not_the_header() {
        let mut content = String::from("SMILES\n");
        for _ in 0..MAX_DATA_ROWS {
            content.push_str("C\n");
        }
        assert_eq!(validate_content(&content), Ok(()));

        content.push_str("C\n");
        assert_eq!(validate_content(&content), Err(ValidationError::TooManyRows));
    }
}
