//! In-memory storage implementation

use super::traits::*;
use async_trait::async_trait;
use civic_types::{Report, ReportId, ReportStatus, StatusFilter, StatusUpdate, Statistics};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::RwLock;

/// In-memory storage for development and testing
#[derive(Debug)]
pub struct InMemoryStorage {
    /// Reports in insertion order
    reports: Arc<RwLock<Vec<Report>>>,
    sequence: Arc<AtomicU64>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            reports: Arc::new(RwLock::new(Vec::new())),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }
}

#[async_trait]
impl ReportStorage for InMemoryStorage {
    async fn insert_report(&self, report: NewStoredReport) -> StorageResult<Report> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Report {
            id: ReportId::new(id.to_string()),
            address: report.address,
            comment: report.comment,
            photo: report.photo,
            contact_email: report.contact_email,
            status: ReportStatus::Pending,
            rejection_reason: None,
            created_at: chrono::Utc::now(),
            coordinates: report.coordinates,
        };

        self.reports.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_reports(&self, filter: StatusFilter) -> StorageResult<Vec<Report>> {
        let reports = self.reports.read().await;
        Ok(reports
            .iter()
            .rev()
            .filter(|r| filter.matches(r.status))
            .cloned()
            .collect())
    }

    async fn get_report(&self, id: &ReportId) -> StorageResult<Option<Report>> {
        let reports = self.reports.read().await;
        Ok(reports.iter().find(|r| &r.id == id).cloned())
    }

    async fn update_status(&self, id: &ReportId, update: &StatusUpdate) -> StorageResult<bool> {
        let mut reports = self.reports.write().await;
        match reports.iter_mut().find(|r| &r.id == id) {
            Some(report) => {
                report.status = update.status;
                report.rejection_reason = update.rejection_reason.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn statistics(&self) -> StorageResult<Statistics> {
        let reports = self.reports.read().await;
        Ok(reports.iter().map(|r| r.status).collect())
    }
}
