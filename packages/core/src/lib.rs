//! Bandersnatch Core
//!
//! This crate provides the data-access layer for a collection of monster
//! records and the chart builder that turns those records into a scatter
//! plot specification.
//!
//! # Modules
//!
//! - [`db`] - Document store client and the `Database` CRUD facade
//! - [`models`] - Records, write results, the `Frame` table and the monster generator
//! - [`chart`] - Vega-Lite scatter plot specifications
//! - [`utils`] - HTML escaping helpers

pub mod chart;
pub mod db;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use chart::{chart, ChartError, ScatterChart};
pub use db::{Changes, Database, DatabaseError, DocumentClient, Filter, StoreConfig};
pub use models::*;
