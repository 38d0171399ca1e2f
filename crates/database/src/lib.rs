//! # Cosmic Database Crate
//!
//! A high-level, application-specific interface to the SQLite database that
//! stores scientists, planets and the missions joining them.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application talks to
//!   `DbRepository` in terms of `core_types` records.
//! - **Explicit relationships:** Foreign-key existence checks and cascading
//!   deletes are done by repository methods, each inside a single transaction.
//!   The schema's foreign keys back them up.
//! - **Asynchronous & Pooled:** All operations are asynchronous over a `SqlitePool`.
//!
//! ## Public API
//!
//! - `connect`: establishes the connection pool from `DatabaseSettings`.
//! - `run_migrations`: applies the embedded schema migrations.
//! - `DbRepository`: create/read/update/delete for every record.
//! - `DbError`: the error kinds returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
