//! Database layer for daybook
//!
//! This module provides the entry store using SQLite with:
//! - Schema migrations
//! - Repository pattern for queries
//!
//! The filter and analytics engines only depend on the read operations;
//! entry lifecycle (create/update/delete) belongs to the application layer.

pub mod repo;
pub mod schema;

pub use repo::Database;
