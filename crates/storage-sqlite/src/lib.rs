//! SQLite storage implementation for Ledgerworth.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `ledgerworth-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for the engine's read and write paths
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist; `core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accounts;
pub mod fx;
pub mod investments;
pub mod portfolio;
pub mod settings;
pub mod transactions;

// Re-export database utilities
pub use db::{create_pool, get_connection, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from ledgerworth-core for convenience
pub use ledgerworth_core::errors::{DatabaseError, Error, Result};
