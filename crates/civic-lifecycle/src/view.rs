//! View projector and user interaction seams
//!
//! The controller never renders anything itself. It hands whole snapshots
//! to a [`ViewProjector`], which overwrites what it showed before, and asks
//! an [`Interaction`] for confirmations and free-text input.

use crate::projector::StatisticsProjection;
use crate::session::Section;
use civic_types::{Report, ReportStatus, RuleViolation, StatusFilter};
use std::sync::Arc;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A dismissible message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// Controls that are disabled while their request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyAction {
    Submit,
    Transition,
}

/// Rendering side of the front-end
pub trait ViewProjector: Send + Sync {
    /// Make `section` the visible one
    fn show_section(&self, section: Section);

    /// Replace the report list
    fn render_reports(&self, filter: StatusFilter, reports: &[Report]);

    /// Show one report; `actions` lists the status buttons to offer
    fn render_detail(&self, report: &Report, actions: &[ReportStatus]);

    /// Replace the statistics dashboard
    fn render_statistics(&self, projection: &StatisticsProjection, recent: &[Report]);

    fn notify(&self, notice: Notice);

    fn close_detail(&self) {}

    fn clear_form(&self) {}

    fn set_busy(&self, _action: BusyAction, _busy: bool) {}
}

/// Dialogs that need an answer from the user
pub trait Interaction: Send + Sync {
    /// Yes/no confirmation gate
    fn confirm(&self, prompt: &str) -> bool;

    /// Ask for a rejection reason. `previous` carries the rule the last
    /// answer broke. `None` cancels the operation.
    fn prompt_rejection_reason(&self, previous: Option<&RuleViolation>) -> Option<String>;
}

impl<T: ViewProjector + ?Sized> ViewProjector for Arc<T> {
    fn show_section(&self, section: Section) {
        (**self).show_section(section)
    }

    fn render_reports(&self, filter: StatusFilter, reports: &[Report]) {
        (**self).render_reports(filter, reports)
    }

    fn render_detail(&self, report: &Report, actions: &[ReportStatus]) {
        (**self).render_detail(report, actions)
    }

    fn render_statistics(&self, projection: &StatisticsProjection, recent: &[Report]) {
        (**self).render_statistics(projection, recent)
    }

    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }

    fn close_detail(&self) {
        (**self).close_detail()
    }

    fn clear_form(&self) {
        (**self).clear_form()
    }

    fn set_busy(&self, action: BusyAction, busy: bool) {
        (**self).set_busy(action, busy)
    }
}

impl<T: Interaction + ?Sized> Interaction for Arc<T> {
    fn confirm(&self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }

    fn prompt_rejection_reason(&self, previous: Option<&RuleViolation>) -> Option<String> {
        (**self).prompt_rejection_reason(previous)
    }
}
