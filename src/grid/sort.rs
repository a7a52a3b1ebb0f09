//! Typed, stable sorting of a filtered view.
//!
//! Cells that both parse fully as finite numbers compare numerically;
//! everything else falls back to case-insensitive lexicographic order.
//! The empty string and non-finite literals such as "NaN" are deliberately
//! treated as text so they sort predictably instead of by parser accident.

use std::cmp::Ordering;

use serde_json::Value;

use super::dataset::{Dataset, cell_text};

/// Sort direction for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// At most one (column, direction) pair. Repeated requests on the same
/// column cycle ascending → descending → unsorted; a different column
/// starts over at ascending.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortState {
    spec: Option<(String, Direction)>,
}

impl SortState {
    /// Advance the cycle for the given column.
    pub fn cycle(&mut self, column: &str) {
        self.spec = match self.spec.take() {
            Some((current, Direction::Ascending)) if current == column => {
                Some((current, Direction::Descending))
            }
            Some((current, Direction::Descending)) if current == column => None,
            _ => Some((column.to_string(), Direction::Ascending)),
        };
    }

    #[must_use]
    pub fn spec(&self) -> Option<(&str, Direction)> {
        self.spec
            .as_ref()
            .map(|(column, direction)| (column.as_str(), *direction))
    }

    /// Direction indicator for a column header, if it is the sorted one.
    #[must_use]
    pub fn indicator(&self, column: &str) -> Option<Direction> {
        match &self.spec {
            Some((current, direction)) if current == column => Some(*direction),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.spec = None;
    }
}

/// Parse a cell's string form as a number for comparison purposes.
fn numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Compare two cell values: numerically when both parse as finite numbers,
/// otherwise case-insensitively on their string forms.
#[must_use]
pub fn compare_cells(a: &Value, b: &Value) -> Ordering {
    let text_a = cell_text(a);
    let text_b = cell_text(b);
    if let (Some(x), Some(y)) = (numeric(&text_a), numeric(&text_b)) {
        // Both finite, so a total order exists.
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    text_a.to_lowercase().cmp(&text_b.to_lowercase())
}

/// Produce an ordered copy of the filtered view. Without a sort spec the
/// filtered order is kept; ties always preserve it (stable sort).
#[must_use]
pub fn apply(dataset: &Dataset, view: &[usize], sort: &SortState) -> Vec<usize> {
    let mut ordered = view.to_vec();
    let Some((column, direction)) = sort.spec() else {
        return ordered;
    };

    ordered.sort_by(|&a, &b| {
        let left = dataset.cell(a, column).unwrap_or(&Value::Null);
        let right = dataset.cell(b, column).unwrap_or(&Value::Null);
        let ordering = compare_cells(left, right);
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
    ordered
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::grid::dataset::Row;

    fn dataset_of(column: &str, values: &[Value]) -> Dataset {
        let rows: Vec<Row> = values
            .iter()
            .map(|value| {
                [(column.to_string(), value.clone())]
                    .into_iter()
                    .collect()
            })
            .collect();
        Dataset::from_rows(rows)
    }

    fn sorted_by(dataset: &Dataset, column: &str, direction: Direction) -> Vec<usize> {
        let mut sort = SortState::default();
        sort.cycle(column);
        if direction == Direction::Descending {
            sort.cycle(column);
        }
        let view: Vec<usize> = (0..dataset.len()).collect();
        apply(dataset, &view, &sort)
    }

    #[test]
    fn molecular_weight_descending_scenario() {
        let rows: Vec<Row> = vec![
            [
                ("SMILES".to_string(), json!("CCO")),
                ("MW".to_string(), json!("46.07")),
            ]
            .into_iter()
            .collect(),
            [
                ("SMILES".to_string(), json!("CCC")),
                ("MW".to_string(), json!("44.10")),
            ]
            .into_iter()
            .collect(),
        ];
        let dataset = Dataset::from_rows(rows);

        let descending = sorted_by(&dataset, "MW", Direction::Descending);
        assert_eq!(descending, vec![0, 1]);
        assert_eq!(
            cell_text(dataset.cell(descending[0], "SMILES").expect("cell")),
            "CCO"
        );

        let ascending = sorted_by(&dataset, "MW", Direction::Ascending);
        assert_eq!(
            cell_text(dataset.cell(ascending[0], "SMILES").expect("cell")),
            "CCC"
        );
    }

    #[test]
    fn numeric_strings_compare_numerically() {
        let dataset = dataset_of("MW", &[json!("100"), json!("9"), json!("20")]);
        assert_eq!(sorted_by(&dataset, "MW", Direction::Ascending), vec![1, 2, 0]);
    }

    #[test]
    fn whitespace_padded_numbers_still_compare_numerically() {
        let dataset = dataset_of("MW", &[json!(" 10 "), json!("2")]);
        assert_eq!(sorted_by(&dataset, "MW", Direction::Ascending), vec![1, 0]);
    }

    #[test]
    fn mixed_values_fall_back_to_text_order() {
        let dataset = dataset_of("name", &[json!("ethanol"), json!("42"), json!("Butane")]);
        // "42" < "butane" < "ethanol" case-insensitively.
        assert_eq!(
            sorted_by(&dataset, "name", Direction::Ascending),
            vec![1, 2, 0]
        );
    }

    #[test]
    fn empty_and_nan_are_text_not_numbers() {
        assert_eq!(numeric(""), None);
        assert_eq!(numeric("   "), None);
        assert_eq!(numeric("NaN"), None);
        assert_eq!(numeric("inf"), None);
        assert_eq!(numeric(" 46.07 "), Some(46.07));
    }

    #[test]
    fn sorting_is_idempotent() {
        let dataset = dataset_of("MW", &[json!("3"), json!("1"), json!("2")]);
        let once = sorted_by(&dataset, "MW", Direction::Ascending);

        let mut sort = SortState::default();
        sort.cycle("MW");
        let twice = apply(&dataset, &once, &sort);
        assert_eq!(once, twice);
    }

    #[test]
    fn reversing_direction_reverses_a_tie_free_order() {
        let dataset = dataset_of("MW", &[json!("3"), json!("1"), json!("2")]);
        let ascending = sorted_by(&dataset, "MW", Direction::Ascending);
        let descending = sorted_by(&dataset, "MW", Direction::Descending);
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn ties_preserve_filtered_order() {
        let dataset = dataset_of("MW", &[json!("1"), json!("1"), json!("1")]);
        assert_eq!(sorted_by(&dataset, "MW", Direction::Ascending), vec![0, 1, 2]);
    }

    #[test]
    fn unsorted_state_keeps_the_input_order() {
        let dataset = dataset_of("MW", &[json!("3"), json!("1")]);
        let view = vec![1, 0];
        assert_eq!(apply(&dataset, &view, &SortState::default()), vec![1, 0]);
    }

    #[test]
    fn cycle_walks_asc_desc_none_and_resets_on_a_new_column() {
        let mut sort = SortState::default();
        sort.cycle("MW");
        assert_eq!(sort.spec(), Some(("MW", Direction::Ascending)));
        sort.cycle("MW");
        assert_eq!(sort.spec(), Some(("MW", Direction::Descending)));
        sort.cycle("MW");
        assert_eq!(sort.spec(), None);

        sort.cycle("MW");
        sort.cycle("SMILES");
        assert_eq!(sort.spec(), Some(("SMILES", Direction::Ascending)));
    }
}
