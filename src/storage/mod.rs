//! Storage layer for rollcall.
//!
//! This module provides SQLite-based persistence for the per-chat presence
//! table.

mod database;
mod migrations;

pub use database::Database;
