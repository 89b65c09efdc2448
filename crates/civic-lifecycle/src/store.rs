//! Remote report store seam
//!
//! The store is the service of record: it assigns ids, creation times and
//! the initial `Pending` status, and computes statistics. The lifecycle
//! core only talks to it through [`ReportStore`].

use crate::error::StoreError;
use async_trait::async_trait;
use civic_types::{Coordinates, Report, ReportId, StatusFilter, StatusUpdate, Statistics, StoreAck};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A photo attached to a submission
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Original file name, used for the extension and the stored name
    pub file_name: String,

    /// MIME type, when known
    pub content_type: Option<String>,

    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// A validated creation request
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub address: String,
    pub comment: String,
    pub photo: PhotoUpload,
    pub contact_email: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Operations offered by the report store
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Create a report from a validated submission
    async fn create_report(&self, report: &NewReport) -> StoreResult<StoreAck>;

    /// List reports, newest first
    async fn list_reports(&self, filter: StatusFilter) -> StoreResult<Vec<Report>>;

    /// Fetch a single report
    async fn get_report(&self, id: &ReportId) -> StoreResult<Report>;

    /// Change a report's status
    async fn update_status(&self, id: &ReportId, update: &StatusUpdate) -> StoreResult<StoreAck>;

    /// Aggregate counts per status
    async fn statistics(&self) -> StoreResult<Statistics>;
}

#[async_trait]
impl<T: ReportStore + ?Sized> ReportStore for std::sync::Arc<T> {
    async fn create_report(&self, report: &NewReport) -> StoreResult<StoreAck> {
        (**self).create_report(report).await
    }

    async fn list_reports(&self, filter: StatusFilter) -> StoreResult<Vec<Report>> {
        (**self).list_reports(filter).await
    }

    async fn get_report(&self, id: &ReportId) -> StoreResult<Report> {
        (**self).get_report(id).await
    }

    async fn update_status(&self, id: &ReportId, update: &StatusUpdate) -> StoreResult<StoreAck> {
        (**self).update_status(id, update).await
    }

    async fn statistics(&self) -> StoreResult<Statistics> {
        (**self).statistics().await
    }
}
