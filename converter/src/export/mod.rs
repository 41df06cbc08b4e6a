//! JSON export of dataset fields.
//!
//! Fields are collected by name into one document, then normalized into
//! plain [`serde_json::Value`]s and written with 2-space indentation.
//! Normalization is a separate pass so that every value is checked before
//! the output file is touched.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};
use crate::models::{Cell, Mapping};

/// Convert a cell to its native JSON form.
///
/// Integers become integer literals, finite floats decimal literals and text
/// strings. NaN and infinities have no JSON form.
pub fn normalize_cell(cell: &Cell, field: &str, key: &str) -> ExportResult<Value> {
    match cell {
        Cell::Integer(i) => Ok(Value::Number(Number::from(*i))),
        Cell::Unsigned(u) => Ok(Value::Number(Number::from(*u))),
        Cell::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
            ExportError::Unserializable {
                field: field.to_string(),
                key: key.to_string(),
                value: cell.to_string(),
            }
        }),
        Cell::Text(s) => Ok(Value::String(s.clone())),
    }
}

/// Convert a whole field to a JSON object.
pub fn normalize_mapping(mapping: &Mapping, field: &str) -> ExportResult<Value> {
    let mut object = Map::new();

    match mapping {
        Mapping::Scalars(scalars) => {
            for (key, cell) in scalars {
                object.insert(key.clone(), normalize_cell(cell, field, key)?);
            }
        }
        Mapping::Records(records) => {
            for (id, row) in records {
                let mut record = Map::new();
                for (column, cell) in row {
                    let location = format!("{}.{}", id, column);
                    record.insert(column.clone(), normalize_cell(cell, field, &location)?);
                }
                object.insert(id.clone(), Value::Object(record));
            }
        }
    }

    Ok(Value::Object(object))
}

/// Collects named fields and writes them as one JSON document.
///
/// Holds borrowed mappings; nothing is copied until [`JsonExporter::to_value`].
#[derive(Debug, Default)]
pub struct JsonExporter<'a> {
    fields: IndexMap<String, &'a Mapping>,
}

impl<'a> JsonExporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `mapping` under `name`. An existing field of the same name is replaced.
    pub fn add_field(&mut self, mapping: &'a Mapping, name: impl Into<String>) {
        let name = name.into();
        debug!("adding field {} ({} entries)", name, mapping.len());
        self.fields.insert(name, mapping);
    }

    /// Field names in the order they were first added.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Normalize the whole document.
    pub fn to_value(&self) -> ExportResult<Value> {
        let mut document = Map::new();
        for (name, mapping) in &self.fields {
            document.insert(name.clone(), normalize_mapping(mapping, name)?);
        }
        Ok(Value::Object(document))
    }

    /// Render the document as indented JSON text.
    pub fn to_json_string(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }

    /// Write the document to `path`, replacing any existing file.
    ///
    /// The file is created only after normalization succeeded.
    pub fn write_to_file(&self, path: &Path) -> ExportResult<()> {
        let document = self.to_value()?;

        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush().map_err(io_error)?;

        info!("wrote {} fields to {}", self.fields.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordMapping, Row, ScalarMapping};
    use serde_json::json;

    fn nodes() -> Mapping {
        let mut records = RecordMapping::new();
        for (id, pressure) in [(1, Cell::Float(50.5)), (2, Cell::Integer(60))] {
            let mut row = Row::new();
            row.insert("node_id".into(), Cell::Integer(id));
            row.insert("pressure".into(), pressure);
            records.insert(id.to_string(), row);
        }
        Mapping::Records(records)
    }

    fn params() -> Mapping {
        let mut scalars = ScalarMapping::new();
        scalars.insert("maxflow".into(), Cell::Integer(100));
        scalars.insert("units".into(), Cell::Text("si".into()));
        Mapping::Scalars(scalars)
    }

    #[test]
    fn test_normalize_cells() {
        assert_eq!(normalize_cell(&Cell::Integer(24), "f", "k").unwrap(), json!(24));
        assert_eq!(
            normalize_cell(&Cell::Unsigned(u64::MAX), "f", "k").unwrap(),
            json!(u64::MAX)
        );
        assert_eq!(normalize_cell(&Cell::Float(0.25), "f", "k").unwrap(), json!(0.25));
        assert_eq!(normalize_cell(&Cell::Text("a".into()), "f", "k").unwrap(), json!("a"));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let err = normalize_cell(&Cell::Float(f64::NAN), "nodes", "1.pmax").unwrap_err();
        assert!(matches!(err, ExportError::Unserializable { .. }));
        assert!(err.to_string().contains("nodes.1.pmax"));

        assert!(normalize_cell(&Cell::Float(f64::INFINITY), "cs", "1").is_err());
    }

    #[test]
    fn test_document_shape() {
        let nodes = nodes();
        let params = params();
        let mut exporter = JsonExporter::new();
        exporter.add_field(&params, "input_param");
        exporter.add_field(&nodes, "nodes");

        let value = exporter.to_value().unwrap();

        assert_eq!(
            value,
            json!({
                "input_param": {"maxflow": 100, "units": "si"},
                "nodes": {
                    "1": {"node_id": 1, "pressure": 50.5},
                    "2": {"node_id": 2, "pressure": 60}
                }
            })
        );
    }

    #[test]
    fn test_field_order_and_overwrite() {
        let nodes = nodes();
        let params = params();
        let mut exporter = JsonExporter::new();
        exporter.add_field(&nodes, "b");
        exporter.add_field(&params, "a");
        exporter.add_field(&params, "b");

        let names: Vec<&str> = exporter.field_names().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(exporter.len(), 2);

        let value = exporter.to_value().unwrap();
        assert_eq!(value["b"], json!({"maxflow": 100, "units": "si"}));
    }

    #[test]
    fn test_indentation() {
        let params = params();
        let mut exporter = JsonExporter::new();
        exporter.add_field(&params, "input_param");

        let text = exporter.to_json_string().unwrap();
        assert_eq!(
            text,
            "{\n  \"input_param\": {\n    \"maxflow\": 100,\n    \"units\": \"si\"\n  }\n}"
        );
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let nodes = nodes();
        let mut exporter = JsonExporter::new();
        exporter.add_field(&nodes, "nodes");

        exporter.write_to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, exporter.to_json_string().unwrap());
    }

    #[test]
    fn test_unserializable_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut scalars = ScalarMapping::new();
        scalars.insert("1".into(), Cell::Float(f64::NAN));
        let bad = Mapping::Scalars(scalars);
        let mut exporter = JsonExporter::new();
        exporter.add_field(&bad, "cs");

        assert!(exporter.write_to_file(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("model.json");
        let params = params();
        let mut exporter = JsonExporter::new();
        exporter.add_field(&params, "input_param");

        let err = exporter.write_to_file(&path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
