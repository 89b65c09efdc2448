//! Civic Daemon library
//!
//! Reference report store for the civic reporting front-ends:
//! - REST API for report submission, listing and status changes
//! - Photo uploads written to and served from a local directory
//! - In-memory and SQLite storage backends
//! - Server lifecycle management

#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod photos;
pub mod server;
pub mod storage;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, StorageError};
pub use photos::PhotoStore;
pub use server::Server;
pub use storage::{InMemoryStorage, ReportStorage, SqliteStorage};
