//! Exact-match filters and partial change sets
//!
//! Field names are always emitted as quoted identifiers and values are always
//! bound as parameters, so nothing from a filter is spliced into a statement
//! as raw text.
//!
//! Values must survive a store round trip unchanged. JSON `null` is rejected
//! anywhere in a record, filter or change set because the store drops
//! null-valued fields instead of keeping them. Integers above `i64::MAX` are
//! rejected because the store keeps signed 64-bit integers.

use super::DatabaseError;
use crate::models::Record;
use serde_json::{Map, Value};

/// Record identifier field managed by the store
pub const ID_FIELD: &str = "id";

/// Conjunction of `field == value` conditions
///
/// An empty filter matches every record in the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Map<String, Value>,
}

impl Filter {
    /// Filter matching every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Render the `WHERE` clause and its parameter bindings
    pub(crate) fn where_clause(&self) -> Result<WhereClause, DatabaseError> {
        let mut conditions = Vec::with_capacity(self.fields.len());
        let mut bindings = Vec::with_capacity(self.fields.len());

        for (index, (field, value)) in self.fields.iter().enumerate() {
            validate_field(field)?;
            validate_value(field, value)?;
            let param = format!("f{}", index);
            conditions.push(format!("{} = ${}", quote_ident(field), param));
            bindings.push((param, value.clone()));
        }

        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        Ok(WhereClause { sql, bindings })
    }
}

impl TryFrom<Value> for Filter {
    type Error = DatabaseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = into_object(value, "filter")?;
        validate_fields(&fields)?;
        Ok(Self { fields })
    }
}

/// Rendered filter: SQL fragment plus named parameters
#[derive(Debug)]
pub(crate) struct WhereClause {
    pub sql: String,
    pub bindings: Vec<(String, Value)>,
}

/// Partial field replacement applied by the update operations
///
/// Fields not named in the change set keep their stored values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes {
    fields: Map<String, Value>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Validated object to merge into matching records
    pub(crate) fn merge_document(&self) -> Result<Value, DatabaseError> {
        if self.fields.is_empty() {
            return Err(DatabaseError::EmptyChanges);
        }
        validate_fields(&self.fields)?;
        Ok(Value::Object(self.fields.clone()))
    }
}

impl TryFrom<Value> for Changes {
    type Error = DatabaseError;

    /// Accepts a plain field map or a `{"$set": {...}}` wrapper
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut fields = into_object(value, "change set")?;

        if fields.len() == 1 && fields.contains_key("$set") {
            let inner = fields.remove("$set").unwrap_or_default();
            fields = into_object(inner, "$set")?;
        }

        let changes = Self { fields };
        changes.merge_document()?;
        Ok(changes)
    }
}

/// Check a record's keys and values before insertion
pub(crate) fn validate_record(record: &Record) -> Result<(), DatabaseError> {
    validate_fields(record)
}

fn validate_fields(fields: &Map<String, Value>) -> Result<(), DatabaseError> {
    fields.iter().try_for_each(|(field, value)| {
        validate_field(field)?;
        validate_value(field, value)
    })
}

/// Reject values the store cannot hold faithfully, nested ones included
fn validate_value(field: &str, value: &Value) -> Result<(), DatabaseError> {
    match value {
        Value::Null => Err(DatabaseError::InvalidDocument(format!(
            "field '{}' holds null, which cannot be stored; omit the field instead",
            field
        ))),
        Value::Number(n) if n.is_u64() && n.as_i64().is_none() => {
            Err(DatabaseError::InvalidDocument(format!(
                "field '{}' holds {}, which exceeds the largest storable integer {}",
                field,
                n,
                i64::MAX
            )))
        }
        Value::Array(items) => items.iter().try_for_each(|item| validate_value(field, item)),
        Value::Object(map) => map
            .values()
            .try_for_each(|nested| validate_value(field, nested)),
        _ => Ok(()),
    }
}

fn validate_field(field: &str) -> Result<(), DatabaseError> {
    if field.is_empty() {
        return Err(DatabaseError::invalid_field(field, "field name is empty"));
    }
    if field.starts_with('$') {
        return Err(DatabaseError::invalid_field(
            field,
            "operators other than a top-level $set are not supported",
        ));
    }
    if field.contains('`') {
        return Err(DatabaseError::invalid_field(
            field,
            "backticks are not allowed in field names",
        ));
    }
    if field == ID_FIELD {
        return Err(DatabaseError::invalid_field(
            field,
            "reserved for the record identifier",
        ));
    }
    Ok(())
}

fn quote_ident(field: &str) -> String {
    format!("`{}`", field)
}

fn into_object(value: Value, what: &str) -> Result<Map<String, Value>, DatabaseError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::InvalidDocument(format!(
            "{} must be a JSON object, got {}",
            what,
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
