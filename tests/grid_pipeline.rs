//! End-to-end checks of the grid pipeline: ingested rows flowing through
//! filter, sort, pagination and export as the interface composes them.

use serde_json::json;

use descry::grid::dataset::STRUCTURE_COLUMN;
use descry::grid::filter::FilterState;
use descry::grid::sort::SortState;
use descry::grid::{Dataset, Row, export, filter, ingest, page, sort};

const TINY_PNG_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg";

fn sample_dataset() -> Dataset {
	let rows: Vec<Row> = [
		("CCO", 46.07, "Ethanol"),
		("CCC", 44.1, "Propane"),
		("c1ccccc1", 78.11, "Benzene"),
		("CC(=O)O", 60.05, "Acetic acid"),
		("CCN", 45.08, "Ethylamine"),
	]
	.into_iter()
	.map(|(smiles, mw, name)| {
		[
			("SMILES".to_string(), json!(smiles)),
			("MW".to_string(), json!(mw)),
			("Name".to_string(), json!(name)),
			(STRUCTURE_COLUMN.to_string(), json!(TINY_PNG_URI)),
		]
		.into_iter()
		.collect()
	})
	.collect();
	Dataset::from_rows(rows)
}

fn view_of(dataset: &Dataset, filters: &FilterState, sort_state: &SortState) -> Vec<usize> {
	let columns = dataset.display_columns();
	let filtered = filter::apply(dataset, &columns, filters);
	sort::apply(dataset, &filtered, sort_state)
}

#[test]
fn unfiltered_unsorted_view_is_the_identity() {
	let dataset = sample_dataset();
	let view = view_of(&dataset, &FilterState::default(), &SortState::default());
	assert_eq!(view, vec![0, 1, 2, 3, 4]);
	assert_eq!(page::slice(&view, 1), &[0, 1, 2, 3, 4]);
}

#[test]
fn filter_then_sort_composes_in_order() {
	let dataset = sample_dataset();
	let mut filters = FilterState::default();
	filters.set("SMILES", "cc");

	let mut sort_state = SortState::default();
	sort_state.cycle("MW");

	// "cc" matches CCO, CCC, c1ccccc1, CC(=O)O, CCN case-insensitively.
	let view = view_of(&dataset, &filters, &sort_state);
	assert_eq!(view.len(), 5);
	// Ascending by molecular weight: propane first, benzene last.
	assert_eq!(view.first(), Some(&1));
	assert_eq!(view.last(), Some(&2));

	filters.set("Name", "eth");
	let narrowed = view_of(&dataset, &filters, &sort_state);
	assert_eq!(narrowed, vec![4, 0], "ethylamine then ethanol by weight");
}

#[test]
fn pagination_windows_over_the_sorted_view() {
	let rows: Vec<Row> = (0..47)
		.map(|index| {
			[
				("SMILES".to_string(), json!(format!("C{index}"))),
				("MW".to_string(), json!(index)),
			]
			.into_iter()
			.collect()
		})
		.collect();
	let dataset = Dataset::from_rows(rows);
	let view = view_of(&dataset, &FilterState::default(), &SortState::default());

	let total = page::total_pages(view.len());
	assert_eq!(total, 5);
	assert_eq!(page::slice(&view, 1).len(), 10);
	assert_eq!(page::slice(&view, 5).len(), 7);
	assert_eq!(page::window(1, total), 1..=3);
	assert_eq!(page::window(3, total), 1..=5);
	assert_eq!(page::window(5, total), 3..=5);
}

#[test]
fn export_serialises_the_filtered_view_not_the_page() {
	let dataset = sample_dataset();
	let columns = dataset.display_columns();
	let mut filters = FilterState::default();
	filters.set("Name", "e");
	let filtered = filter::apply(&dataset, &columns, &filters);

	let text = export::csv_text(&dataset, &filtered, &columns);
	let lines: Vec<&str> = text.lines().collect();
	assert_eq!(lines.len(), 1 + filtered.len());
	assert_eq!(lines[0], columns.join(","));
	// Structure cells export the bare base64 payload, JSON-stringified.
	assert!(lines[1].contains("\"iVBORw0KGgoAAAANSUhEUg\""));
	assert!(!lines[1].contains("data:image"));
}

#[test]
fn ingested_batches_reassemble_into_the_full_dataset() {
	let body = serde_json::to_string(
		&(0..250)
			.map(|index| {
				json!({
					"SMILES": format!("C{index}"),
					"MW": index,
				})
			})
			.collect::<Vec<_>>(),
	)
	.expect("serialise test body");

	let rows = ingest::parse_rows(&body).expect("parse rows");
	let plan = ingest::plan(rows).expect("plan ingestion");
	assert_eq!(plan.total_rows(), 250);

	let mut dataset = Dataset::new(plan.columns.clone());
	for batch in plan.batches {
		dataset.push_rows(batch);
	}
	assert_eq!(dataset.len(), 250);

	let view = view_of(&dataset, &FilterState::default(), &SortState::default());
	assert_eq!(page::total_pages(view.len()), 25);
}

#[test]
fn empty_service_results_surface_as_the_empty_filter_error() {
	let err = ingest::parse_rows("[]").expect_err("empty array is an empty result");
	assert!(err.is_empty_result());
	assert_eq!(err.to_string(), "No molecules pass the filter");

	let err = ingest::parse_rows("{\"detail\": \"oops\"}")
		.expect_err("non-array body is an empty result");
	assert!(err.is_empty_result());
}
