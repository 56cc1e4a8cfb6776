//! # Rulesmith Store
//!
//! Persistence backends for the rulesmith rule history. Provides a trait-based
//! load/save interface with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The history keeps its working state in memory and mirrors it into a durable
//! backend after every mutation. This crate abstracts that mirror behind the
//! [`HistoryBackend`] trait: `load` reads a named collection back in insertion
//! order, `save` atomically replaces it. The primary implementation is
//! [`SqliteBackend`], with [`MemoryBackend`] for tests and for running without
//! a database file.
//!
//! ## Key Types
//!
//! - [`HistoryBackend`] - The async load/save trait for collection persistence
//! - [`SqliteBackend`] - SQLite-based durable storage
//! - [`MemoryBackend`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rulesmith_store::{HistoryBackend, SqliteBackend};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let backend = SqliteBackend::open("history.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let backend = SqliteBackend::open_memory().unwrap();
//!
//!     // Load the collection (empty if never saved)
//!     let records = backend.load("history").await.unwrap();
//!     assert!(records.is_empty());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Whole-collection writes**: `save` replaces the collection in one
//!   transaction, mirroring the in-memory state exactly
//! - **Order preservation**: rows carry an explicit position; `load` returns
//!   records in insertion order
//! - **Collection isolation**: collections share a table but never observe
//!   each other's rows

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use traits::HistoryBackend;
