//! Background client for the descriptor-calculation service.
//!
//! Each submission runs on its own worker thread: it POSTs the CSV as a
//! multipart form, parses the JSON response, and streams the rows back to
//! the UI thread as bounded ingestion batches tagged with the request id.
//! A later submission supersedes an earlier one purely by id; results from
//! a stale request are discarded by the receiver.

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::error::ServiceError;
use crate::grid::dataset::Row;
use crate::grid::ingest;

/// Endpoint used when neither configuration nor CLI supplies one.
pub const DEFAULT_ENDPOINT: &str =
    "https://molecular-descriptor.own3.aganitha.ai/calculate-descriptors";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Which family of descriptors to request. Only 1D/2D is currently served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptorType {
    #[default]
    OneTwoD,
    ThreeD,
    ForceField,
    Quantum,
}

impl DescriptorType {
    /// Wire name, exactly as the service expects it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTwoD => "1D/2D",
            Self::ThreeD => "3D",
            Self::ForceField => "FF-based",
            Self::Quantum => "QM-based",
        }
    }

    /// Whether the service currently accepts this type.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::OneTwoD)
    }
}

impl FromStr for DescriptorType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "1D/2D" => Ok(Self::OneTwoD),
            "3D" => Ok(Self::ThreeD),
            "FF-based" => Ok(Self::ForceField),
            "QM-based" => Ok(Self::Quantum),
            other => Err(format!(
                "unknown descriptor type '{other}' (expected 1D/2D, 3D, FF-based, or QM-based)"
            )),
        }
    }
}

impl fmt::Display for DescriptorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculation backend on the service side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    RdKit,
    Padel,
    Mordred,
}

impl Method {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RdKit => "RDKit",
            Self::Padel => "PaDEL",
            Self::Mordred => "Mordred",
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "RDKit" => Ok(Self::RdKit),
            "PaDEL" => Ok(Self::Padel),
            "Mordred" => Ok(Self::Mordred),
            other => Err(format!(
                "unknown method '{other}' (expected RDKit, PaDEL, or Mordred)"
            )),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side molecule filter applied before descriptor calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterOption {
    #[default]
    None,
    MolecularFragment,
    SmolDrug,
    Protac,
}

impl FilterOption {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::MolecularFragment => "Molecular fragment",
            Self::SmolDrug => "SMOL drug",
            Self::Protac => "PROTAC",
        }
    }
}

impl FromStr for FilterOption {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "None" => Ok(Self::None),
            "Molecular fragment" => Ok(Self::MolecularFragment),
            "SMOL drug" => Ok(Self::SmolDrug),
            "PROTAC" => Ok(Self::Protac),
            other => Err(format!(
                "unknown filter option '{other}' (expected None, Molecular fragment, SMOL drug, or PROTAC)"
            )),
        }
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how to reach the service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One calculation submission: the already-validated CSV plus the three
/// request fields the service expects.
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    pub file_name: String,
    pub csv: Vec<u8>,
    pub descriptor_type: DescriptorType,
    pub method: Method,
    pub filter_option: FilterOption,
}

/// Message from a request worker to the UI thread.
#[derive(Debug)]
pub enum ServiceEvent {
    /// One ingestion increment. `columns` is present only on the first
    /// batch of a request; `complete` marks the last.
    Batch {
        id: u64,
        columns: Option<Vec<String>>,
        rows: Vec<Row>,
        complete: bool,
    },
    /// The request failed, or produced nothing to show.
    Failed { id: u64, error: ServiceError },
}

/// Submit a calculation request on a fresh worker thread. Results arrive on
/// `tx` tagged with `id`; the receiver decides whether they are still
/// current.
pub fn submit(config: ServiceConfig, request: CalculationRequest, id: u64, tx: Sender<ServiceEvent>) {
    thread::spawn(move || {
        info!(
            "submitting {} ({} bytes) to {} [request {id}]",
            request.file_name,
            request.csv.len(),
            config.endpoint
        );
        match run_request(&config, request) {
            Ok(plan) => stream_plan(plan, id, &tx),
            Err(error) => {
                warn!("request {id} failed: {error}");
                let _ = tx.send(ServiceEvent::Failed { id, error });
            }
        }
    });
}

fn run_request(
    config: &ServiceConfig,
    request: CalculationRequest,
) -> Result<ingest::IngestPlan, ServiceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()?;

    let file = reqwest::blocking::multipart::Part::bytes(request.csv)
        .file_name(request.file_name)
        .mime_str("text/csv")?;
    let form = reqwest::blocking::multipart::Form::new()
        .part("file", file)
        .text("descriptor_type", request.descriptor_type.as_str())
        .text("method", request.method.as_str())
        .text("filter_option", request.filter_option.as_str());

    let response = client.post(&config.endpoint).multipart(form).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text()?;
    let rows = ingest::parse_rows(&body)?;
    ingest::plan(rows)
}

/// Deliver the plan one batch per message so the UI thread can interleave
/// renders and input handling with the merges.
fn stream_plan(plan: ingest::IngestPlan, id: u64, tx: &Sender<ServiceEvent>) {
    let total = plan.total_rows();
    let last = plan.batches.len().saturating_sub(1);
    let mut columns = Some(plan.columns);

    for (index, rows) in plan.batches.into_iter().enumerate() {
        let event = ServiceEvent::Batch {
            id,
            columns: columns.take(),
            rows,
            complete: index == last,
        };
        if tx.send(event).is_err() {
            return;
        }
        thread::yield_now();
    }
    info!("request {id} delivered {total} rows");
}
