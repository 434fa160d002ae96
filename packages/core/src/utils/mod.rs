//! Utility functions for Bandersnatch Core
//!
//! This module provides common utility functions used across the codebase.

mod html;

pub use html::{escape_html, escape_script};
