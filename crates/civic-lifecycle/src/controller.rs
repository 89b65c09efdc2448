//! Report lifecycle controller
//!
//! Drives every user action as one sequential request/response cycle:
//! local checks, then (if needed) a confirmation, then a single store call,
//! then a wholesale refresh of the dependent views. Failures never touch
//! the session or the views beyond raising a notice.

use crate::error::{LifecycleError, LifecycleResult};
use crate::privilege::Privilege;
use crate::projector::{project_statistics, StatisticsProjection};
use crate::session::{Section, UiSessionState};
use crate::store::ReportStore;
use crate::validator::{SubmissionFields, SubmissionValidator};
use crate::view::{BusyAction, Interaction, Notice, ViewProjector};
use civic_types::{
    rules, Report, ReportId, ReportStatus, RuleViolation, StatusFilter, StatusUpdate, StoreAck,
};
use std::time::Duration;

/// Number of reports shown in the dashboard's recent list
pub const RECENT_REPORTS_LIMIT: usize = 6;

/// Default pause between a successful submission and the list view
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Controller tuning
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Time the success notice stays on the form before switching to the list
    pub redirect_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

/// Result of a status transition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The store applied the change
    Applied { message: String },
    /// The user backed out before anything was sent
    Cancelled,
}

/// Keeps a busy flag raised for one store call.
///
/// Dropping it lowers the flag and re-enables the control, including when
/// the surrounding future is dropped mid-request.
struct BusyGuard<'a, V: ViewProjector> {
    flag: &'a mut bool,
    view: &'a V,
    action: BusyAction,
}

impl<'a, V: ViewProjector> BusyGuard<'a, V> {
    fn hold(flag: &'a mut bool, view: &'a V, action: BusyAction) -> Self {
        *flag = true;
        view.set_busy(action, true);
        Self { flag, view, action }
    }
}

impl<V: ViewProjector> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        *self.flag = false;
        self.view.set_busy(self.action, false);
    }
}

/// Coordinates store calls, user dialogs and view refreshes
pub struct LifecycleController<S, V, I> {
    store: S,
    view: V,
    interaction: I,
    privilege: Privilege,
    config: ControllerConfig,
}

impl<S, V, I> LifecycleController<S, V, I>
where
    S: ReportStore,
    V: ViewProjector,
    I: Interaction,
{
    pub fn new(store: S, view: V, interaction: I, privilege: Privilege) -> Self {
        Self {
            store,
            view,
            interaction,
            privilege,
            config: ControllerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn privilege(&self) -> &Privilege {
        &self.privilege
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    // ========== Navigation ==========

    /// Switch the visible section and load what it shows
    pub async fn show_section(
        &self,
        session: &mut UiSessionState,
        section: Section,
    ) -> LifecycleResult<()> {
        if section == Section::Analytics && !self.privilege.can_view_statistics() {
            return Err(LifecycleError::NotPrivileged);
        }

        session.set_section(section);
        self.view.show_section(section);

        match section {
            Section::Create => {
                session.mount_map();
            }
            Section::List => {
                // failures are already on screen as a notice
                let _ = self.load_reports(session).await;
            }
            Section::Analytics => {
                self.load_statistics().await;
            }
        }

        Ok(())
    }

    /// Change the list filter and reload the list
    pub async fn set_filter(
        &self,
        session: &mut UiSessionState,
        filter: StatusFilter,
    ) -> LifecycleResult<Vec<Report>> {
        session.set_filter(filter);
        self.load_reports(session).await
    }

    // ========== Reports ==========

    /// Fetch the list for the session's filter and render it
    pub async fn load_reports(&self, session: &UiSessionState) -> LifecycleResult<Vec<Report>> {
        let filter = session.filter();
        match self.store.list_reports(filter).await {
            Ok(reports) => {
                tracing::debug!(%filter, count = reports.len(), "Loaded reports");
                self.view.render_reports(filter, &reports);
                Ok(reports)
            }
            Err(e) => Err(self.surface(e.into())),
        }
    }

    /// Fetch one report and show it in the detail view
    pub async fn open_detail(
        &self,
        session: &mut UiSessionState,
        id: &ReportId,
    ) -> LifecycleResult<Report> {
        match self.store.get_report(id).await {
            Ok(report) => {
                let actions: &[ReportStatus] = if self.privilege.can_change_status() {
                    &ReportStatus::ALL
                } else {
                    &[]
                };
                self.view.render_detail(&report, actions);
                session.set_open_detail(Some(report.id.clone()));
                Ok(report)
            }
            Err(e) => Err(self.surface(e.into())),
        }
    }

    /// Close the detail view, if one is open
    pub fn close_detail(&self, session: &mut UiSessionState) {
        if session.open_detail().is_some() {
            session.set_open_detail(None);
            self.view.close_detail();
        }
    }

    // ========== Submission ==========

    /// Validate and send a new report.
    ///
    /// On success the form is cleared and, after the redirect delay, the
    /// list section is shown. On failure the form is left as it was.
    pub async fn submit_report(
        &self,
        session: &mut UiSessionState,
        fields: &SubmissionFields,
    ) -> LifecycleResult<StoreAck> {
        if session.form_busy {
            return Err(LifecycleError::Busy);
        }

        let report = SubmissionValidator::prepare(fields, session.marker())
            .map_err(|e| self.surface(e.into()))?;

        let result = {
            let _busy = BusyGuard::hold(&mut session.form_busy, &self.view, BusyAction::Submit);
            self.store.create_report(&report).await
        };

        let ack = result.map_err(|e| self.surface(e.into()))?;
        tracing::info!(report_id = ?ack.id, "Report submitted");

        self.view.notify(Notice::success(ack.message.clone()));
        self.view.clear_form();
        session.clear_form();

        tokio::time::sleep(self.config.redirect_delay).await;
        self.show_section(session, Section::List).await?;

        Ok(ack)
    }

    // ========== Status workflow ==========

    /// Move a report to `target`.
    ///
    /// Entering `Rejected` needs a reason of at least ten characters; the
    /// user is asked until one is valid or they cancel. Every target goes
    /// through the confirmation gate before the request is sent.
    pub async fn request_transition(
        &self,
        session: &mut UiSessionState,
        id: &ReportId,
        target: ReportStatus,
        reason: Option<String>,
    ) -> LifecycleResult<TransitionOutcome> {
        if !self.privilege.can_change_status() {
            return Err(self.surface(LifecycleError::NotPrivileged));
        }
        if session.transition_busy {
            return Err(LifecycleError::Busy);
        }

        let reason = if target.requires_reason() {
            match self.collect_rejection_reason(reason) {
                Some(reason) => Some(reason),
                None => return Ok(TransitionOutcome::Cancelled),
            }
        } else {
            None
        };

        let prompt = format!("Change status of report {} to \"{}\"?", id, target);
        if !self.interaction.confirm(&prompt) {
            tracing::debug!(report_id = %id, %target, "Transition declined");
            return Ok(TransitionOutcome::Cancelled);
        }

        let update = StatusUpdate::new(target, reason);

        let result = {
            let _busy = BusyGuard::hold(
                &mut session.transition_busy,
                &self.view,
                BusyAction::Transition,
            );
            self.store.update_status(id, &update).await
        };

        let ack = result.map_err(|e| self.surface(e.into()))?;
        tracing::info!(report_id = %id, %target, "Report status changed");

        self.view.notify(Notice::success(ack.message.clone()));
        self.close_detail(session);
        let _ = self.load_reports(session).await;
        if session.section() == Section::Analytics {
            self.load_statistics().await;
        }

        Ok(TransitionOutcome::Applied {
            message: ack.message,
        })
    }

    /// Ask until the reason is valid; `None` when the user cancels.
    fn collect_rejection_reason(&self, supplied: Option<String>) -> Option<String> {
        let mut candidate = supplied;
        let mut previous: Option<RuleViolation> = None;

        loop {
            let reason = match candidate.take() {
                Some(reason) => reason,
                None => self.interaction.prompt_rejection_reason(previous.as_ref())?,
            };

            match rules::check_rejection_reason(Some(&reason)) {
                Ok(()) => return Some(reason),
                Err(violation) => {
                    self.view.notify(Notice::error(violation.to_string()));
                    previous = Some(violation);
                }
            }
        }
    }

    // ========== Statistics ==========

    /// Refresh the dashboard.
    ///
    /// Failures are logged only; the previous dashboard stays on screen.
    pub async fn load_statistics(&self) -> Option<StatisticsProjection> {
        let stats = match self.store.statistics().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load statistics");
                return None;
            }
        };
        let projection = project_statistics(&stats);

        let recent = match self.store.list_reports(StatusFilter::All).await {
            Ok(mut reports) => {
                reports.truncate(RECENT_REPORTS_LIMIT);
                reports
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load recent reports");
                return None;
            }
        };

        self.view.render_statistics(&projection, &recent);
        Some(projection)
    }

    /// Show an error to the user and hand it back
    fn surface(&self, error: LifecycleError) -> LifecycleError {
        if let LifecycleError::Connectivity { detail } = &error {
            tracing::warn!(%detail, "Store unreachable");
        }
        self.view.notify(Notice::error(error.to_string()));
        error
    }
}
