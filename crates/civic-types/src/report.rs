//! Report types
//!
//! A Report is created by a citizen submission and afterwards only changes
//! through status transitions issued by an administrator.

use crate::rules::{self, RuleViolation};
use crate::ReportId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A submitted incident report, as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Store-assigned identifier, immutable
    pub id: ReportId,

    /// Where the incident is
    pub address: String,

    /// What the citizen observed
    pub comment: String,

    /// Stored photo file name
    pub photo: String,

    /// Optional contact address for follow-up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    /// Current workflow status
    pub status: ReportStatus,

    /// Only meaningful while `status` is `Rejected`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// Store-assigned creation time, immutable
    pub created_at: DateTime<Utc>,

    /// Location picked on the map, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Report {
    /// Rejection reason, hidden unless the report is actually rejected
    pub fn visible_rejection_reason(&self) -> Option<&str> {
        match self.status {
            ReportStatus::Rejected => self.rejection_reason.as_deref(),
            _ => None,
        }
    }
}

/// Report workflow status
///
/// Any status may move to any other; the only guarded entry is `Rejected`,
/// which needs a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(alias = "Pendiente")]
    Pending,
    #[serde(alias = "Verificando")]
    Verifying,
    #[serde(alias = "Solucionado")]
    Resolved,
    #[serde(alias = "Rechazado")]
    Rejected,
}

impl ReportStatus {
    /// All statuses in display order
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::Verifying,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    /// Does entering this status need a rejection reason?
    pub fn requires_reason(&self) -> bool {
        matches!(self, ReportStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Verifying => "Verifying",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Rejected => "Rejected",
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for status names that match no variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown report status: {0}")]
pub struct UnknownStatusError(pub String);

impl FromStr for ReportStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(ReportStatus::Pending),
            "verifying" | "verificando" => Ok(ReportStatus::Verifying),
            "resolved" | "solucionado" => Ok(ReportStatus::Resolved),
            "rejected" | "rechazado" => Ok(ReportStatus::Rejected),
            _ => Err(UnknownStatusError(s.to_string())),
        }
    }
}

/// Filter applied when listing reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReportStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ReportStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// Value for the `status` query parameter; `None` means no filter
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status.as_str()),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "todos" => Ok(StatusFilter::All),
            _ => s.parse().map(StatusFilter::Only),
        }
    }
}

impl From<ReportStatus> for StatusFilter {
    fn from(status: ReportStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Latitude/longitude pair captured from a map click
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, RuleViolation> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if !valid {
            return Err(RuleViolation::InvalidCoordinates { lat, lng });
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Payload of a status change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ReportStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl StatusUpdate {
    /// Build an update; the reason is kept only when the target is `Rejected`.
    pub fn new(status: ReportStatus, reason: Option<String>) -> Self {
        let rejection_reason = if status.requires_reason() { reason } else { None };
        Self {
            status,
            rejection_reason,
        }
    }

    /// Check the payload-shape rule for this update
    pub fn validate(&self) -> Result<(), RuleViolation> {
        if self.status.requires_reason() {
            rules::check_rejection_reason(self.rejection_reason.as_deref())?;
        }
        Ok(())
    }
}

/// Human-readable acknowledgment returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAck {
    pub message: String,

    /// Set when the acknowledged operation created a report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ReportId>,
}

impl StoreAck {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn created(message: impl Into<String>, id: ReportId) -> Self {
        Self {
            message: message.into(),
            id: Some(id),
        }
    }
}
