//! # Gridiron Database Crate
//!
//! This crate is the application's interface to the record store: a single
//! local SQLite file holding three independent tables (`game_info`,
//! `overall_drive`, `plays`). No relationships are enforced between them.
//!
//! ## Public API
//!
//! - `connect`: opens (and creates, if absent) the store and returns a pool.
//! - `run_migrations`: applies the embedded schema.
//! - `DbRepository`: holds the pool and provides the create/read operations.
//! - `DbError`: the errors this crate can return.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
