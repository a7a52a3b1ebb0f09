//! The results-grid engine: an in-memory tabular result set with filtering,
//! sorting, pagination, chunked ingestion, and CSV export.
//!
//! Every derived view is an explicit pure function over row indices, composed
//! as `page::slice(sort::apply(filter::apply(..)))` by the owning UI
//! component whenever upstream state changes. Nothing here touches the
//! terminal or the network.

pub mod dataset;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod page;
pub mod sort;

pub use dataset::{Dataset, Row, STRUCTURE_COLUMN, cell_text, is_image_uri};
pub use filter::{FilterDebounce, FilterState};
pub use page::PageState;
pub use sort::{Direction, SortState};
