//! Database - CRUD facade over one document collection
//!
//! A `Database` binds a [`DocumentClient`] to a single SCHEMALESS table and
//! exposes create / seed / read / update / delete / count plus the tabular
//! exports used for reporting.
//!
//! # Semantics
//!
//! - Reads never return the internal `id` field.
//! - Updates merge the given fields into matching records; other fields are
//!   left alone.
//! - `reset` deletes every record but keeps the table definition.
//! - Write results carry affected counts, not just an acknowledgement.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bandersnatch_core::db::{Changes, Database, DocumentClient, Filter};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DocumentClient::from_env().await?;
//!     let db = Database::open(&client, "monsters").await?;
//!
//!     db.reset().await?;
//!     db.seed(1000).await?;
//!
//!     let filter = Filter::new().eq("name", "FaKE Monster");
//!     db.update_one(&filter, &Changes::new().set("strength", 95)).await?;
//!     println!("{:?}", db.read_one(&filter).await?);
//!
//!     client.shutdown().await?;
//!     Ok(())
//! }
//! ```

use super::client::DocumentClient;
use super::error::{DatabaseError, QueryContext};
use super::query::{validate_record, Changes, Filter, WhereClause};
use crate::models::{
    DeleteResult, Frame, InsertResult, MonsterGenerator, Record, RecordGenerator, UpdateResult,
};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;
use surrealdb::engine::any::Any;
use surrealdb::method::Query;

/// CRUD access to one named collection
#[derive(Clone)]
pub struct Database {
    client: DocumentClient,
    collection: String,
}

impl Database {
    /// Bind to `collection`, defining it if it does not exist yet
    ///
    /// # Errors
    ///
    /// [`DatabaseError::InvalidCollection`] unless the name matches
    /// `[A-Za-z_][A-Za-z0-9_]*`; [`DatabaseError::QueryFailed`] if the table
    /// definition is rejected.
    pub async fn open(client: &DocumentClient, collection: &str) -> Result<Self, DatabaseError> {
        if !is_identifier(collection) {
            return Err(DatabaseError::InvalidCollection {
                name: collection.to_string(),
            });
        }

        client
            .db()
            .query(format!(
                "DEFINE TABLE IF NOT EXISTS `{}` SCHEMALESS;",
                collection
            ))
            .await
            .and_then(|response| response.check())
            .query_context(&format!("Failed to define collection {}", collection))?;

        tracing::info!(collection, "Opened collection");

        Ok(Self {
            client: client.clone(),
            collection: collection.to_string(),
        })
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.collection
    }

    // Create

    /// Insert a single record
    pub async fn create(&self, record: Record) -> Result<InsertResult, DatabaseError> {
        validate_record(&record)?;

        self.client
            .db()
            .query("CREATE type::table($table) CONTENT $record RETURN NONE;")
            .bind(("table", self.collection.clone()))
            .bind(("record", Value::Object(record)))
            .await
            .and_then(|response| response.check())
            .query_context("Failed to create record")?;

        tracing::debug!(collection = %self.collection, "Created record");
        Ok(InsertResult::inserted(1))
    }

    /// Insert a batch of records in one statement; all or nothing
    pub async fn create_many(&self, records: Vec<Record>) -> Result<InsertResult, DatabaseError> {
        if records.is_empty() {
            return Ok(InsertResult::inserted(0));
        }
        for record in &records {
            validate_record(record)?;
        }

        let count = records.len() as u64;
        let batch: Vec<Value> = records.into_iter().map(Value::Object).collect();

        self.client
            .db()
            .query(format!(
                "INSERT INTO `{}` $records RETURN NONE;",
                self.collection
            ))
            .bind(("records", batch))
            .await
            .and_then(|response| response.check())
            .query_context("Failed to insert records")?;

        tracing::debug!(collection = %self.collection, inserted = count, "Inserted records");
        Ok(InsertResult::inserted(count))
    }

    /// Bulk-insert `amount` randomly generated monsters
    pub async fn seed(&self, amount: usize) -> Result<InsertResult, DatabaseError> {
        self.seed_with(&mut MonsterGenerator::new(), amount).await
    }

    /// Bulk-insert `amount` records drawn from `generator`
    pub async fn seed_with<G>(
        &self,
        generator: &mut G,
        amount: usize,
    ) -> Result<InsertResult, DatabaseError>
    where
        G: RecordGenerator + ?Sized,
    {
        let result = self.create_many(generator.generate(amount)).await?;
        tracing::info!(collection = %self.collection, seeded = result.inserted, "Seeded collection");
        Ok(result)
    }

    // Read

    /// First record matching `filter`, if any
    pub async fn read_one(&self, filter: &Filter) -> Result<Option<Record>, DatabaseError> {
        let records = self.select(filter, true).await?;
        Ok(records.into_iter().next())
    }

    /// Every record in the collection
    pub async fn read_all(&self) -> Result<Vec<Record>, DatabaseError> {
        self.select(&Filter::all(), false).await
    }

    /// Every record matching `filter`, in no particular order
    pub async fn read_many(&self, filter: &Filter) -> Result<Vec<Record>, DatabaseError> {
        self.select(filter, false).await
    }

    async fn select(&self, filter: &Filter, first: bool) -> Result<Vec<Record>, DatabaseError> {
        let clause = filter.where_clause()?;
        let limit = if first { " LIMIT 1" } else { "" };
        let sql = format!(
            "SELECT * OMIT id FROM type::table($table){}{};",
            clause.sql, limit
        );

        let mut response = self
            .bound(sql, clause)
            .await
            .query_context("Failed to read records")?;

        let records: Vec<Record> = response
            .take(0)
            .query_context("Failed to extract records from response")?;

        tracing::debug!(collection = %self.collection, found = records.len(), "Read records");
        Ok(records)
    }

    /// Full collection as a [`Frame`]
    pub async fn dataframe(&self) -> Result<Frame, DatabaseError> {
        let records = self.read_all().await?;
        Ok(Frame::from_records(&records))
    }

    /// Full collection as an HTML table, `None` when the collection is empty
    pub async fn html_table(&self) -> Result<Option<String>, DatabaseError> {
        let frame = self.dataframe().await?;
        if frame.is_empty() {
            return Ok(None);
        }
        Ok(Some(frame.to_html()))
    }

    // Update

    /// Merge `changes` into the first record matching `filter`
    pub async fn update_one(
        &self,
        filter: &Filter,
        changes: &Changes,
    ) -> Result<UpdateResult, DatabaseError> {
        self.update(filter, changes, true).await
    }

    /// Merge `changes` into every record matching `filter`
    pub async fn update_many(
        &self,
        filter: &Filter,
        changes: &Changes,
    ) -> Result<UpdateResult, DatabaseError> {
        self.update(filter, changes, false).await
    }

    async fn update(
        &self,
        filter: &Filter,
        changes: &Changes,
        first: bool,
    ) -> Result<UpdateResult, DatabaseError> {
        let document = changes.merge_document()?;
        let clause = filter.where_clause()?;

        // RETURN DIFF yields one patch list per matched record; an empty
        // list means the merge left that record unchanged
        let sql = if first {
            format!(
                "UPDATE (SELECT VALUE id FROM type::table($table){} LIMIT 1) MERGE $changes RETURN DIFF;",
                clause.sql
            )
        } else {
            format!(
                "UPDATE type::table($table) MERGE $changes{} RETURN DIFF;",
                clause.sql
            )
        };

        let mut response = self
            .bound(sql, clause)
            .bind(("changes", document))
            .await
            .query_context("Failed to update records")?;

        let diffs: Vec<Vec<IgnoredAny>> = response
            .take(0)
            .query_context("Failed to extract update results")?;

        let matched = diffs.len() as u64;
        let modified = diffs.iter().filter(|diff| !diff.is_empty()).count() as u64;

        tracing::debug!(collection = %self.collection, matched, modified, "Updated records");
        Ok(UpdateResult::new(matched, modified))
    }

    // Delete

    /// Remove the first record matching `filter`
    pub async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult, DatabaseError> {
        self.delete(filter, true).await
    }

    /// Remove every record matching `filter`
    pub async fn delete_many(&self, filter: &Filter) -> Result<DeleteResult, DatabaseError> {
        self.delete(filter, false).await
    }

    /// Remove every record; the collection itself stays defined
    pub async fn reset(&self) -> Result<DeleteResult, DatabaseError> {
        let result = self.delete(&Filter::all(), false).await?;
        tracing::info!(collection = %self.collection, deleted = result.deleted, "Reset collection");
        Ok(result)
    }

    async fn delete(&self, filter: &Filter, first: bool) -> Result<DeleteResult, DatabaseError> {
        let clause = filter.where_clause()?;
        let sql = if first {
            format!(
                "DELETE (SELECT VALUE id FROM type::table($table){} LIMIT 1) RETURN BEFORE;",
                clause.sql
            )
        } else {
            format!("DELETE type::table($table){} RETURN BEFORE;", clause.sql)
        };

        let mut response = self
            .bound(sql, clause)
            .await
            .query_context("Failed to delete records")?;

        let removed: Vec<IgnoredAny> = response
            .take(0)
            .query_context("Failed to extract delete results")?;

        let deleted = removed.len() as u64;
        tracing::debug!(collection = %self.collection, deleted, "Deleted records");
        Ok(DeleteResult::deleted(deleted))
    }

    // Aggregates

    /// Number of records matching `filter`; `None` counts the whole collection
    pub async fn count(&self, filter: Option<&Filter>) -> Result<u64, DatabaseError> {
        #[derive(Debug, Deserialize)]
        struct CountRow {
            count: u64,
        }

        let all = Filter::all();
        let clause = filter.unwrap_or(&all).where_clause()?;
        let sql = format!(
            "SELECT count() FROM type::table($table){} GROUP ALL;",
            clause.sql
        );

        let mut response = self
            .bound(sql, clause)
            .await
            .query_context("Failed to count records")?;

        let row: Option<CountRow> = response
            .take(0)
            .query_context("Failed to extract record count")?;

        Ok(row.map_or(0, |r| r.count))
    }

    /// Query with `$table` and the filter parameters bound
    fn bound(&self, sql: String, clause: WhereClause) -> Query<'_, Any> {
        let mut query = self
            .client
            .db()
            .query(sql)
            .bind(("table", self.collection.clone()));
        for binding in clause.bindings {
            query = query.bind(binding);
        }
        query
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
