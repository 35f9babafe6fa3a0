//! # daybook-core
//!
//! Core library for daybook - a personal journaling application.
//!
//! This library provides:
//! - Domain types for users, journal entries, and the mood catalog
//! - An SQLite entry store
//! - The filter engine (date/mood/tag/text predicates over one owner's entries)
//! - The analytics engine (streaks, mood statistics, frequency tables, trends)
//! - Configuration management and logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use daybook_core::{AnalyticsEngine, Config, Database, DateWindow, MoodCatalog};
//!
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let catalog = MoodCatalog::builtin();
//! let analytics = AnalyticsEngine::new(&db, &catalog);
//! let streak = analytics
//!     .current_streak(Some("owner-id"))
//!     .expect("failed to compute streak");
//! println!("current streak: {} days", streak);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{AnalyticsEngine, EntryFilter, FilterEngine, MoodDistribution};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use moods::{MoodCatalog, MoodCategory};
pub use session::SessionContext;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod moods;
pub mod session;
pub mod types;
