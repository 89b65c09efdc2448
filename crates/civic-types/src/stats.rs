//! Aggregate report statistics, computed by the store

use crate::ReportStatus;
use serde::{Deserialize, Serialize};

/// Report counts per status, plus the total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    #[serde(rename = "Pending", alias = "Pendiente")]
    pub pending: u64,

    #[serde(rename = "Verifying", alias = "Verificando")]
    pub verifying: u64,

    #[serde(rename = "Resolved", alias = "Solucionado")]
    pub resolved: u64,

    #[serde(rename = "Rejected", alias = "Rechazado")]
    pub rejected: u64,

    #[serde(rename = "Total")]
    pub total: u64,
}

impl Statistics {
    /// Count for a single status
    pub fn count(&self, status: ReportStatus) -> u64 {
        match status {
            ReportStatus::Pending => self.pending,
            ReportStatus::Verifying => self.verifying,
            ReportStatus::Resolved => self.resolved,
            ReportStatus::Rejected => self.rejected,
        }
    }

    /// Add `n` reports in `status`, keeping the total in step
    pub fn record(&mut self, status: ReportStatus, n: u64) {
        let slot = match status {
            ReportStatus::Pending => &mut self.pending,
            ReportStatus::Verifying => &mut self.verifying,
            ReportStatus::Resolved => &mut self.resolved,
            ReportStatus::Rejected => &mut self.rejected,
        };
        *slot += n;
        self.total += n;
    }
}

impl FromIterator<ReportStatus> for Statistics {
    fn from_iter<I: IntoIterator<Item = ReportStatus>>(iter: I) -> Self {
        let mut stats = Statistics::default();
        for status in iter {
            stats.record(status, 1);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tracks_total() {
        let stats: Statistics = [
            ReportStatus::Pending,
            ReportStatus::Pending,
            ReportStatus::Rejected,
        ]
        .into_iter()
        .collect();

        assert_eq!(stats.count(ReportStatus::Pending), 2);
        assert_eq!(stats.count(ReportStatus::Rejected), 1);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn test_wire_keys() {
        let json = r#"{"Total":10,"Pendiente":4,"Verificando":3,"Resolved":2,"Rejected":1}"#;
        let stats: Statistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.pending, 4);
        assert_eq!(stats.verifying, 3);
        assert_eq!(stats.resolved, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.total, 10);

        let out = serde_json::to_value(stats).unwrap();
        assert_eq!(out["Pending"], 4);
        assert_eq!(out["Total"], 10);
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let stats: Statistics = serde_json::from_str(r#"{"Total":0}"#).unwrap();
        assert_eq!(stats, Statistics::default());
    }
}
