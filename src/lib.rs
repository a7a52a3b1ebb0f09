//! descry: a terminal explorer for molecular-descriptor results.
//!
//! The crate submits a CSV of SMILES strings to a descriptor-calculation
//! service and presents the results in an interactive grid with per-column
//! filtering, typed sorting, pagination, structure previews, and CSV export.

pub mod app_dirs;
pub mod error;
pub mod grid;
pub mod service;
pub mod theme;
pub mod ui;
pub mod validate;

pub use error::{ServiceError, ValidationError};
pub use grid::Dataset;
pub use service::{CalculationRequest, DescriptorType, FilterOption, Method, ServiceConfig};
pub use ui::{App, ExploreOutcome};
