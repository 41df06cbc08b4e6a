//! Dataset assembly: read the fixed set of model CSV files from one folder.
//!
//! Every output field is described once in [`FIELDS`]: its name, its default
//! file name and how the file is shaped into a [`Mapping`]:
//!
//! ```text
//! input_param.csv          ─ key,value ─▶  {"maxflow": 100, ...}
//! input_network_nodes.csv  ─ records  ─▶  {"1": {"node_id": 1, ...}, ...}
//! input_int_pslack.csv     ─ scalar   ─▶  {"1": 0.5, "2": 0.0}
//! ```

use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{CsvError, CsvResult, PipelineError, PipelineResult};
use crate::models::{Mapping, RecordMapping, ScalarMapping};
use crate::parser::{read_table, TableMode};

// =============================================================================
// Field table
// =============================================================================

/// How a CSV file becomes a [`Mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Headerless `key,value` lines.
    KeyValue,
    /// One record per row, keyed by the stringified id column.
    Records { id_column: &'static str },
    /// First data row only, column → value.
    Scalar,
}

/// One output field and where it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub file_name: &'static str,
    pub shape: Shape,
}

const fn field(name: &'static str, file_name: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec {
        name,
        file_name,
        shape,
    }
}

/// All dataset fields, in output order.
pub const FIELDS: [FieldSpec; 13] = [
    field("input_param", "input_param.csv", Shape::KeyValue),
    field("nodes", "input_network_nodes.csv", Shape::Records { id_column: "node_id" }),
    field("pipes", "input_network_pipes.csv", Shape::Records { id_column: "pipe_id" }),
    field("compressors", "input_network_comps.csv", Shape::Records { id_column: "comp_id" }),
    field("gnodes", "input_network_gnodes.csv", Shape::Records { id_column: "gnode_id" }),
    field("pslack", "input_int_pslack.csv", Shape::Scalar),
    field("cslack", "input_int_cslack.csv", Shape::Scalar),
    field("qbar", "input_int_qbar.csv", Shape::Scalar),
    field("gbar", "input_int_gbar.csv", Shape::Scalar),
    field("smax", "input_int_smax.csv", Shape::Scalar),
    field("dmax", "input_int_dmax.csv", Shape::Scalar),
    field("cs", "input_int_cs.csv", Shape::Scalar),
    field("cd", "input_int_cd.csv", Shape::Scalar),
];

/// Look up a field by name.
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

// =============================================================================
// File name overrides
// =============================================================================

/// Per-field file names, defaulting to [`FieldSpec::file_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNames {
    overrides: IndexMap<&'static str, String>,
}

impl FileNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `field` from `file_name` instead of its default file.
    pub fn set(&mut self, field: &str, file_name: impl Into<String>) -> PipelineResult<()> {
        let spec = field_spec(field).ok_or_else(|| PipelineError::UnknownField(field.to_string()))?;
        self.overrides.insert(spec.name, file_name.into());
        Ok(())
    }

    /// Builder form of [`FileNames::set`].
    pub fn with(mut self, field: &str, file_name: impl Into<String>) -> PipelineResult<Self> {
        self.set(field, file_name)?;
        Ok(self)
    }

    /// File name to read for `spec`.
    pub fn file_for<'a>(&'a self, spec: &'a FieldSpec) -> &'a str {
        self.overrides
            .get(spec.name)
            .map(String::as_str)
            .unwrap_or(spec.file_name)
    }
}

// =============================================================================
// Shaping
// =============================================================================

/// Read a headered table into records keyed by `id_column`.
///
/// Duplicate ids are not an error: the later row replaces the earlier one.
pub fn read_record_table(path: &Path, id_column: &str) -> CsvResult<RecordMapping> {
    let table = read_table(path, TableMode::Headered)?;

    if !table.headers.iter().any(|h| h == id_column) {
        return Err(CsvError::MissingColumn {
            path: path.to_path_buf(),
            column: id_column.to_string(),
        });
    }

    let mut records = RecordMapping::with_capacity(table.len());
    for row in table.rows {
        let id = match row.get(id_column) {
            Some(cell) => cell.to_string(),
            None => continue,
        };
        if records.insert(id.clone(), row).is_some() {
            warn!("{}: duplicate {} '{}', keeping last", path.display(), id_column, id);
        }
    }

    Ok(records)
}

/// Read a headered table's first data row as column → value.
///
/// Rows after the first are ignored.
pub fn read_scalar_table(path: &Path) -> CsvResult<ScalarMapping> {
    let table = read_table(path, TableMode::Headered)?;
    let extra_rows = table.len().saturating_sub(1);

    let first = table.rows.into_iter().next().ok_or_else(|| CsvError::NoDataRows {
        path: path.to_path_buf(),
    })?;

    if extra_rows > 0 {
        warn!("{}: ignoring {} rows after the first", path.display(), extra_rows);
    }

    Ok(first)
}

/// Read a headerless `key,value` table.
///
/// A repeated key keeps its last value.
pub fn read_key_value_table(path: &Path) -> CsvResult<ScalarMapping> {
    let table = read_table(path, TableMode::KeyValue)?;

    let mut params = ScalarMapping::with_capacity(table.len());
    for mut row in table.rows {
        let (key, value) = match (row.shift_remove("key"), row.shift_remove("value")) {
            (Some(key), Some(value)) => (key, value),
            _ => continue,
        };
        let key = key.to_string();
        if params.insert(key.clone(), value).is_some() {
            warn!("{}: duplicate key '{}', keeping last", path.display(), key);
        }
    }

    Ok(params)
}

/// Read and shape one field from `folder`.
pub fn read_field(folder: &Path, spec: &FieldSpec, file_names: &FileNames) -> CsvResult<Mapping> {
    let path = folder.join(file_names.file_for(spec));
    info!("reading {} from {}", spec.name, path.display());

    let mapping = match spec.shape {
        Shape::KeyValue => Mapping::Scalars(read_key_value_table(&path)?),
        Shape::Records { id_column } => Mapping::Records(read_record_table(&path, id_column)?),
        Shape::Scalar => Mapping::Scalars(read_scalar_table(&path)?),
    };

    debug!("{}: {} entries", spec.name, mapping.len());
    Ok(mapping)
}

// =============================================================================
// Dataset
// =============================================================================

/// The assembled model: one [`Mapping`] per field of [`FIELDS`].
///
/// Populated once by [`Dataset::read_all`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    fields: IndexMap<&'static str, Mapping>,
}

impl Dataset {
    /// Read every field from `folder`, in [`FIELDS`] order.
    ///
    /// Stops at the first failing file.
    pub fn read_all(folder: &Path, file_names: &FileNames) -> CsvResult<Self> {
        let mut fields = IndexMap::with_capacity(FIELDS.len());
        for spec in &FIELDS {
            fields.insert(spec.name, read_field(folder, spec, file_names)?);
        }
        Ok(Self { fields })
    }

    pub fn get(&self, name: &str) -> Option<&Mapping> {
        self.fields.get(name)
    }

    /// Fields in [`FIELDS`] order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Mapping)> + '_ {
        self.fields.iter().map(|(name, mapping)| (*name, mapping))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
