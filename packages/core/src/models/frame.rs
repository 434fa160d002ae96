//! In-memory tabular view of a record set
//!
//! `Frame` is what reporting and charting consume: an ordered list of column
//! names plus one row per record. Columns are the union of the field names
//! seen across all records, in first-seen order; a record lacking a column
//! contributes `Value::Null` in that cell.
//!
//! A record's own keys are taken in sorted order. `serde_json::Map` only
//! keeps insertion order when some crate in the build enables
//! `preserve_order`, so sorting keeps column order the same either way.

use super::Record;
use crate::utils::escape_html;
use serde_json::Value;
use std::fmt::Write as _;

/// Rows and columns materialized from a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Build a frame from records
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            let mut keys: Vec<&String> = record.keys().collect();
            keys.sort();
            for key in keys {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Rows back as records, with null cells left out
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .filter(|(_, value)| !value.is_null())
                    .map(|(column, value)| (column.clone(), value.clone()))
                    .collect()
            })
            .collect()
    }

    /// Render as an HTML table with a positional index column
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n");

        html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n      <th></th>\n");
        for column in &self.columns {
            let _ = writeln!(html, "      <th>{}</th>", escape_html(column));
        }
        html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

        for (index, row) in self.rows.iter().enumerate() {
            html.push_str("    <tr>\n");
            let _ = writeln!(html, "      <th>{}</th>", index);
            for cell in row {
                let _ = writeln!(html, "      <td>{}</td>", escape_html(&cell_text(cell)));
            }
            html.push_str("    </tr>\n");
        }

        html.push_str("  </tbody>\n</table>");
        html
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

impl From<Vec<Record>> for Frame {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(&records)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "NaN".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}
