//! Civic Lifecycle - report workflow rules for the front-end
//!
//! This crate holds the logic that sits between a user's actions and the
//! remote report store:
//! - Validating new submissions before anything is uploaded
//! - Gating status transitions (privilege, rejection reason, confirmation)
//! - Refreshing the list and dashboard after a change
//! - Projecting store statistics into percentage bars
//!
//! The store, the renderer and the dialogs are collaborators behind the
//! [`ReportStore`], [`ViewProjector`] and [`Interaction`] traits.

#![deny(unsafe_code)]

pub mod controller;
pub mod error;
pub mod privilege;
pub mod projector;
pub mod session;
pub mod store;
pub mod validator;
pub mod view;

pub use controller::{
    ControllerConfig, LifecycleController, TransitionOutcome, DEFAULT_REDIRECT_DELAY,
    RECENT_REPORTS_LIMIT,
};
pub use error::{LifecycleError, LifecycleResult, StoreError, ValidationError};
pub use privilege::Privilege;
pub use projector::{project_statistics, StatisticsProjection, StatusBar};
pub use session::{MapSession, Section, UiSessionState, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM};
pub use store::{NewReport, PhotoUpload, ReportStore, StoreResult};
pub use validator::{SubmissionFields, SubmissionValidator};
pub use view::{BusyAction, Interaction, Notice, NoticeKind, ViewProjector};
