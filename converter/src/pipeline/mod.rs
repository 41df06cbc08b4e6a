//! High-level conversion API: model folder in, JSON document out.
//!
//! # Example
//!
//! ```rust,ignore
//! use gasnet_converter::{convert, ConvertOptions};
//!
//! let options = ConvertOptions::new("data/model6ss_test_0", "out", "model6ss_test_0.json");
//! let summary = convert(&options)?;
//! println!("Wrote {}", summary.output_path.display());
//! ```

use std::path::{Path, PathBuf};
use tracing::info;

use crate::dataset::{Dataset, FileNames};
use crate::error::PipelineResult;
use crate::export::JsonExporter;

/// Default input folder.
pub const DEFAULT_DATA_PATH: &str = "./model6ss_test_0/";

/// Default output folder.
pub const DEFAULT_OUTPUT_FOLDER: &str = "./";

/// Default output file name.
pub const DEFAULT_JSON_FILE: &str = "model6ss_test_0.json";

/// Resolved options for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Folder holding the input CSV files.
    pub data_path: PathBuf,
    /// Folder the JSON file is written to.
    pub output_folder: PathBuf,
    /// Name of the JSON file.
    pub json_file: String,
    /// Per-field input file names.
    pub file_names: FileNames,
}

impl ConvertOptions {
    pub fn new(
        data_path: impl Into<PathBuf>,
        output_folder: impl Into<PathBuf>,
        json_file: impl Into<String>,
    ) -> Self {
        Self {
            data_path: data_path.into(),
            output_folder: output_folder.into(),
            json_file: json_file.into(),
            file_names: FileNames::new(),
        }
    }

    pub fn with_file_names(mut self, file_names: FileNames) -> Self {
        self.file_names = file_names;
        self
    }

    /// Full path of the output file.
    pub fn output_path(&self) -> PathBuf {
        self.output_folder.join(&self.json_file)
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH, DEFAULT_OUTPUT_FOLDER, DEFAULT_JSON_FILE)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output_path: PathBuf,
    /// Entry count per field, in output order.
    pub field_counts: Vec<(String, usize)>,
}

/// Build the exporter for a dataset, one field per dataset field.
pub fn export_dataset(dataset: &Dataset) -> JsonExporter<'_> {
    let mut exporter = JsonExporter::new();
    for (name, mapping) in dataset.fields() {
        exporter.add_field(mapping, name);
    }
    exporter
}

/// Read every input file, then write the JSON document.
///
/// Nothing is written unless all inputs were read and shaped.
pub fn convert(options: &ConvertOptions) -> PipelineResult<ConvertSummary> {
    info!("reading data from {}", options.data_path.display());
    let dataset = Dataset::read_all(&options.data_path, &options.file_names)?;

    let output_path = options.output_path();
    write_dataset(&dataset, &output_path)?;

    Ok(ConvertSummary {
        output_path,
        field_counts: dataset
            .fields()
            .map(|(name, mapping)| (name.to_string(), mapping.len()))
            .collect(),
    })
}

/// Export an already assembled dataset to `path`.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> PipelineResult<()> {
    export_dataset(dataset).write_to_file(path)?;
    Ok(())
}
