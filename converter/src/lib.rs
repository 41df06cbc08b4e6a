//! # gasnet-converter - gas-network model CSV to JSON
//!
//! Reads the fixed set of CSV files describing a gas-network model (nodes,
//! pipes, compressors, gnodes, slack values, bounds and costs) from one
//! folder and writes them as a single JSON document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ CSV folder  │────▶│   Parser    │────▶│   Dataset   │────▶│  JSON file  │
//! │ (13 files)  │     │ (typed rows)│     │ (13 fields) │     │  (indent 2) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gasnet_converter::{convert, ConvertOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = convert(&ConvertOptions::new("model/", "./", "model.json"))?;
//!     println!("Wrote {}", summary.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Cells, rows, tables and mappings
//! - [`parser`] - CSV reading with type inference
//! - [`dataset`] - Field table and dataset assembly
//! - [`export`] - JSON normalization and output
//! - [`pipeline`] - One-call conversion
//! - [`config`] - Command-line configuration
//! - [`logging`] - Log output set-up

// Core modules
pub mod error;
pub mod models;

// Reading
pub mod parser;
pub mod dataset;

// Writing
pub mod export;

// Orchestration
pub mod pipeline;

// Command line
pub mod config;
pub mod logging;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, ExportError, PipelineError, CsvResult, ExportResult, PipelineResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Cell, Mapping, RecordMapping, Row, ScalarMapping, Table};

// =============================================================================
// Re-exports - Reading
// =============================================================================

pub use parser::{read_table, parse_table, TableMode};

pub use dataset::{
    field_spec,
    read_field,
    read_key_value_table,
    read_record_table,
    read_scalar_table,
    Dataset,
    FieldSpec,
    FileNames,
    Shape,
    FIELDS,
};

// =============================================================================
// Re-exports - Export & Pipeline
// =============================================================================

pub use export::JsonExporter;

pub use pipeline::{convert, export_dataset, write_dataset, ConvertOptions, ConvertSummary};

pub use config::{Cli, LogLevel};
