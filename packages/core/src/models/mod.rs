//! Data Models
//!
//! This module contains the data structures shared by the store and the
//! reporting layer:
//!
//! - [`Record`] - a schema-free monster record
//! - [`InsertResult`], [`UpdateResult`], [`DeleteResult`] - structured write outcomes
//! - [`Frame`] - tabular view of a record set, with HTML export
//! - [`MonsterGenerator`] - synthetic records for seeding

mod frame;
pub mod generator;
mod record;

pub use frame::Frame;
pub use generator::{MonsterGenerator, RecordGenerator};
pub use record::{DeleteResult, InsertResult, Record, UpdateResult};
