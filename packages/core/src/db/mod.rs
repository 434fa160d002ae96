//! Database Layer
//!
//! This module handles all document store interactions using SurrealDB:
//!
//! - Connection configuration from the `DB_URL` connection string
//! - A process-wide [`DocumentClient`] opened once and passed explicitly
//! - The [`Database`] CRUD facade bound to one SCHEMALESS collection
//! - Exact-match [`Filter`]s and partial [`Changes`]
//!
//! # Architecture
//!
//! The driver is used through its `any` engine so the same code runs against
//! an embedded in-memory store (tests), embedded RocksDB (local persistence)
//! or a remote server over HTTP/WebSocket with TLS.

mod client;
pub mod config;
mod database;
mod error;
mod query;

pub use client::DocumentClient;
pub use config::{Credentials, Engine, StoreConfig, DB_URL_VAR};
pub use database::Database;
pub use error::DatabaseError;
pub use query::{Changes, Filter, ID_FIELD};
