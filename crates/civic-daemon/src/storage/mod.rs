//! Storage layer for civic-daemon
//!
//! The store of record for reports: assigns ids and creation times, keeps
//! status and rejection reason, and counts reports per status.

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;
pub use traits::{NewStoredReport, ReportStorage, StorageResult};
