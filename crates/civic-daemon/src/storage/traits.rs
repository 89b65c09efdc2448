//! Storage trait definitions

use crate::error::StorageError;
use async_trait::async_trait;
use civic_types::{Coordinates, Report, ReportId, StatusFilter, StatusUpdate, Statistics};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A validated report whose photo is already on disk
#[derive(Debug, Clone, PartialEq)]
pub struct NewStoredReport {
    pub address: String,
    pub comment: String,
    /// Stored photo file name, relative to the uploads directory
    pub photo: String,
    pub contact_email: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Storage for citizen reports
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Insert a report as `Pending`, assigning its id and creation time
    async fn insert_report(&self, report: NewStoredReport) -> StorageResult<Report>;

    /// List reports matching `filter`, newest first
    async fn list_reports(&self, filter: StatusFilter) -> StorageResult<Vec<Report>>;

    /// Get a report by ID
    async fn get_report(&self, id: &ReportId) -> StorageResult<Option<Report>>;

    /// Apply a status change. Returns `false` when the report does not exist.
    async fn update_status(&self, id: &ReportId, update: &StatusUpdate) -> StorageResult<bool>;

    /// Count reports per status
    async fn statistics(&self) -> StorageResult<Statistics>;
}
