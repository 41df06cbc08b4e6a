//! Domain models for the conversion pipeline.
//!
//! - [`Cell`] - One typed CSV cell (integer, float or text)
//! - [`Row`] / [`Table`] - Parsed CSV content
//! - [`RecordMapping`] - Rows keyed by their id column (nodes, pipes, ...)
//! - [`ScalarMapping`] - Column → value pairs from a single-row table
//! - [`Mapping`] - Either of the two, as stored per dataset field

use indexmap::IndexMap;
use std::fmt;

// =============================================================================
// Cell
// =============================================================================

/// A single CSV cell with its lexically inferred type.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Parsed as a 64-bit integer.
    Integer(i64),
    /// Integer above `i64::MAX`.
    Unsigned(u64),
    /// Parsed as a finite 64-bit float.
    Float(f64),
    /// Anything else, kept verbatim.
    Text(String),
}

impl Cell {
    /// Infer the cell type from raw text: integer, then float, else text.
    ///
    /// Inference is per cell; no column-wide unification happens.
    /// Words the float parser accepts (`nan`, `inf`, `infinity`) stay text.
    pub fn infer(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Integer(i);
        }
        if let Ok(u) = raw.parse::<u64>() {
            return Self::Unsigned(u);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Self::Float(f),
            _ => Self::Text(raw.to_string()),
        }
    }
}

/// Stringification used for record ids and mapping keys.
///
/// Floats always carry a fractional part (`2.0`, not `2`).
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(i) => write!(f, "{}", i),
            Cell::Unsigned(u) => write!(f, "{}", u),
            Cell::Float(x) => write!(f, "{:?}", x),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Tables
// =============================================================================

/// One parsed row: column name → cell, in column order.
pub type Row = IndexMap<String, Cell>;

/// Rows parsed from one CSV file, sharing one set of column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in file order. For key,value tables: `["key", "value"]`.
    pub headers: Vec<String>,
    /// Data rows in file order.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Mappings
// =============================================================================

/// Column → value pairs (single-row tables and `input_param`).
pub type ScalarMapping = IndexMap<String, Cell>;

/// Stringified id → full row. Later rows overwrite earlier ones on id collision.
pub type RecordMapping = IndexMap<String, Row>;

/// A shaped dataset field.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapping {
    Records(RecordMapping),
    Scalars(ScalarMapping),
}

impl Mapping {
    /// Number of top-level entries (records or scalar keys).
    pub fn len(&self) -> usize {
        match self {
            Mapping::Records(records) => records.len(),
            Mapping::Scalars(scalars) => scalars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_records(&self) -> Option<&RecordMapping> {
        match self {
            Mapping::Records(records) => Some(records),
            Mapping::Scalars(_) => None,
        }
    }

    pub fn as_scalars(&self) -> Option<&ScalarMapping> {
        match self {
            Mapping::Scalars(scalars) => Some(scalars),
            Mapping::Records(_) => None,
        }
    }
}

impl From<RecordMapping> for Mapping {
    fn from(records: RecordMapping) -> Self {
        Mapping::Records(records)
    }
}

impl From<ScalarMapping> for Mapping {
    fn from(scalars: ScalarMapping) -> Self {
        Mapping::Scalars(scalars)
    }
}
