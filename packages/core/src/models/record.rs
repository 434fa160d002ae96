//! Monster records and write results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A monster record: a flat, schema-free mapping of field name to value
pub type Record = Map<String, Value>;

/// Outcome of `create` / `create_many` / `seed`
///
/// # Examples
///
/// ```rust
/// use bandersnatch_core::models::InsertResult;
///
/// let result = InsertResult::inserted(3);
/// assert!(result.acknowledged);
/// assert_eq!(result.inserted, 3);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertResult {
    /// The store accepted the write
    pub acknowledged: bool,
    /// Number of records written
    pub inserted: u64,
}

impl InsertResult {
    pub fn inserted(count: u64) -> Self {
        Self {
            acknowledged: true,
            inserted: count,
        }
    }
}

/// Outcome of `update_one` / `update_many`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateResult {
    /// The store accepted the write
    pub acknowledged: bool,
    /// Records selected by the filter
    pub matched: u64,
    /// Matched records whose stored content actually changed
    pub modified: u64,
}

impl UpdateResult {
    pub fn new(matched: u64, modified: u64) -> Self {
        Self {
            acknowledged: true,
            matched,
            modified,
        }
    }
}

/// Outcome of `delete_one` / `delete_many` / `reset`
///
/// ```rust
/// use bandersnatch_core::models::DeleteResult;
///
/// // Nothing matched: still acknowledged, nothing removed
/// let result = DeleteResult::deleted(0);
/// assert!(result.acknowledged);
/// assert!(!result.any());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    /// The store accepted the write
    pub acknowledged: bool,
    /// Records removed
    pub deleted: u64,
}

impl DeleteResult {
    pub fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted: count,
        }
    }

    /// Whether at least one record was removed
    pub fn any(&self) -> bool {
        self.deleted > 0
    }
}
