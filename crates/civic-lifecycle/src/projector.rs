//! Statistics projection into percentage bars

use civic_types::{ReportStatus, Statistics};
use serde::Serialize;

/// One bar of the status chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusBar {
    pub status: ReportStatus,
    pub count: u64,
    /// Share of the total, 0..=100 for consistent snapshots
    pub percentage: f64,
}

impl StatusBar {
    /// Bar width as a CSS-style percentage
    pub fn width(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Display values for a statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsProjection {
    pub total: u64,
    pub bars: Vec<StatusBar>,
}

impl StatisticsProjection {
    pub fn bar(&self, status: ReportStatus) -> Option<&StatusBar> {
        self.bars.iter().find(|bar| bar.status == status)
    }
}

/// Project counts into one bar per status, in display order.
///
/// A zero total yields 0% everywhere.
pub fn project_statistics(stats: &Statistics) -> StatisticsProjection {
    let bars = ReportStatus::ALL
        .iter()
        .map(|&status| {
            let count = stats.count(status);
            StatusBar {
                status,
                count,
                percentage: percentage(count, stats.total),
            }
        })
        .collect();

    StatisticsProjection {
        total: stats.total,
        bars,
    }
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}
