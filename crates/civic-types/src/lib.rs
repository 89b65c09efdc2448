//! Civic Types - Core types for citizen incident reporting
//!
//! Reports are submitted by citizens with an address, a comment and a photo,
//! then triaged by administrators through a small status workflow.
//!
//! ## Architectural Boundaries
//!
//! - **civic-types** owns: the report data model and the field rules shared
//!   by every party that touches a submission
//! - **civic-lifecycle** owns: client-side validation, status transitions and
//!   view refresh rules
//! - **civic-daemon** owns: persistence, photo storage and aggregation
//!
//! ## Key Concepts
//!
//! - **Report**: a geolocated incident record owned by the store
//! - **ReportStatus**: `Pending`, `Verifying`, `Resolved` or `Rejected`
//! - **Statistics**: per-status counts plus a total, computed by the store
//! - **Rules**: minimum lengths and photo limits applied before storage

#![deny(unsafe_code)]

pub mod ids;
pub mod report;
pub mod rules;
pub mod stats;

pub use ids::ReportId;
pub use report::{
    Coordinates, Report, ReportStatus, StatusFilter, StatusUpdate, StoreAck,
    UnknownStatusError,
};
pub use rules::RuleViolation;
pub use stats::Statistics;
