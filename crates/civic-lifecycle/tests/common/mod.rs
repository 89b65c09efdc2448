//! Test doubles for the lifecycle collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use civic_lifecycle::*;
use civic_types::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Store calls, in the order they were made
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create(NewReport),
    List(StatusFilter),
    Get(ReportId),
    Update(ReportId, StatusUpdate),
    Statistics,
}

/// In-memory store that records every call
#[derive(Default)]
pub struct FakeStore {
    reports: Mutex<Vec<Report>>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<VecDeque<StoreError>>,
    hang: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store holding `n` pending reports; report "1" is the newest
    pub fn seeded(n: usize) -> Arc<Self> {
        let store = Self::default();
        {
            let mut reports = store.reports.lock().unwrap();
            for i in 0..n {
                reports.push(sample_report(&format!("{}", i + 1), i as i64));
            }
        }
        Arc::new(store)
    }

    /// Make the next store call fail with `error`
    pub fn fail_next(&self, error: StoreError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Make the next create or update never complete
    pub fn hang_next(&self) {
        self.hang.store(true, Ordering::SeqCst);
    }

    async fn maybe_hang(&self) {
        if self.hang.swap(false, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(ReportId, StatusUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Update(id, update) => Some((id, update)),
                _ => None,
            })
            .collect()
    }

    pub fn creates(&self) -> Vec<NewReport> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Create(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    pub fn report(&self, id: &str) -> Option<Report> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id.as_str() == id)
            .cloned()
    }

    fn record(&self, call: StoreCall) -> StoreResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReportStore for FakeStore {
    async fn create_report(&self, report: &NewReport) -> StoreResult<StoreAck> {
        self.record(StoreCall::Create(report.clone()))?;
        self.maybe_hang().await;
        let mut reports = self.reports.lock().unwrap();
        let id = ReportId::new(format!("{}", reports.len() + 1));
        reports.push(Report {
            id: id.clone(),
            address: report.address.clone(),
            comment: report.comment.clone(),
            photo: report.photo.file_name.clone(),
            contact_email: report.contact_email.clone(),
            status: ReportStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
            coordinates: report.coordinates,
        });
        Ok(StoreAck::created("Report created successfully", id))
    }

    async fn list_reports(&self, filter: StatusFilter) -> StoreResult<Vec<Report>> {
        self.record(StoreCall::List(filter))?;
        let mut reports: Vec<Report> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.matches(r.status))
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    async fn get_report(&self, id: &ReportId) -> StoreResult<Report> {
        self.record(StoreCall::Get(id.clone()))?;
        self.report(id.as_str())
            .ok_or_else(|| StoreError::not_found(format!("Report {}", id)))
    }

    async fn update_status(&self, id: &ReportId, update: &StatusUpdate) -> StoreResult<StoreAck> {
        self.record(StoreCall::Update(id.clone(), update.clone()))?;
        self.maybe_hang().await;
        let mut reports = self.reports.lock().unwrap();
        let report = reports
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::not_found(format!("Report {}", id)))?;
        report.status = update.status;
        report.rejection_reason = update.rejection_reason.clone();
        Ok(StoreAck::new(format!("Status updated to {}", update.status)))
    }

    async fn statistics(&self) -> StoreResult<Statistics> {
        self.record(StoreCall::Statistics)?;
        Ok(self.reports.lock().unwrap().iter().map(|r| r.status).collect())
    }
}

pub fn sample_report(id: &str, age_minutes: i64) -> Report {
    Report {
        id: ReportId::new(id),
        address: "Av. X 123".into(),
        comment: "Hay un bache enorme".into(),
        photo: "bache.jpg".into(),
        contact_email: None,
        status: ReportStatus::Pending,
        rejection_reason: None,
        created_at: Utc::now() - Duration::minutes(age_minutes),
        coordinates: None,
    }
}

/// Everything the controller asked the view to do
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Section(Section),
    Reports(StatusFilter, Vec<ReportId>),
    Detail(ReportId, Vec<ReportStatus>),
    Statistics(Vec<f64>, Vec<ReportId>),
    Notice(Notice),
    CloseDetail,
    ClearForm,
    Busy(BusyAction, bool),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: fn(&ViewEvent) -> bool) -> usize {
        self.events().iter().filter(|e| wanted(e)).count()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ViewProjector for RecordingView {
    fn show_section(&self, section: Section) {
        self.push(ViewEvent::Section(section));
    }

    fn render_reports(&self, filter: StatusFilter, reports: &[Report]) {
        self.push(ViewEvent::Reports(
            filter,
            reports.iter().map(|r| r.id.clone()).collect(),
        ));
    }

    fn render_detail(&self, report: &Report, actions: &[ReportStatus]) {
        self.push(ViewEvent::Detail(report.id.clone(), actions.to_vec()));
    }

    fn render_statistics(&self, projection: &StatisticsProjection, recent: &[Report]) {
        self.push(ViewEvent::Statistics(
            projection.bars.iter().map(|b| b.percentage).collect(),
            recent.iter().map(|r| r.id.clone()).collect(),
        ));
    }

    fn notify(&self, notice: Notice) {
        self.push(ViewEvent::Notice(notice));
    }

    fn close_detail(&self) {
        self.push(ViewEvent::CloseDetail);
    }

    fn clear_form(&self) {
        self.push(ViewEvent::ClearForm);
    }

    fn set_busy(&self, action: BusyAction, busy: bool) {
        self.push(ViewEvent::Busy(action, busy));
    }
}

/// Answers dialogs from a script
#[derive(Default)]
pub struct ScriptedInteraction {
    confirm: Mutex<VecDeque<bool>>,
    reasons: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<Option<RuleViolation>>>,
    confirmations: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    /// Confirms everything and has no reasons queued
    pub fn agreeable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_confirmations(answers: &[bool]) -> Arc<Self> {
        let script = Self::default();
        script.confirm.lock().unwrap().extend(answers.iter().copied());
        Arc::new(script)
    }

    pub fn with_reasons(reasons: &[Option<&str>]) -> Arc<Self> {
        let script = Self::default();
        script
            .reasons
            .lock()
            .unwrap()
            .extend(reasons.iter().map(|r| r.map(str::to_string)));
        Arc::new(script)
    }

    /// How many times the user was asked for a reason, with the rule the
    /// previous answer broke
    pub fn reason_prompts(&self) -> Vec<Option<RuleViolation>> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().unwrap().clone()
    }
}

impl Interaction for ScriptedInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        self.confirmations.lock().unwrap().push(prompt.to_string());
        self.confirm.lock().unwrap().pop_front().unwrap_or(true)
    }

    fn prompt_rejection_reason(&self, previous: Option<&RuleViolation>) -> Option<String> {
        self.prompts.lock().unwrap().push(previous.cloned());
        // an exhausted script behaves like the user cancelling
        self.reasons.lock().unwrap().pop_front().flatten()
    }
}

pub type TestController =
    LifecycleController<Arc<FakeStore>, Arc<RecordingView>, Arc<ScriptedInteraction>>;

pub fn admin_controller(
    store: &Arc<FakeStore>,
    view: &Arc<RecordingView>,
    interaction: &Arc<ScriptedInteraction>,
) -> TestController {
    LifecycleController::new(
        store.clone(),
        view.clone(),
        interaction.clone(),
        Privilege::administrator("test-token"),
    )
}

pub fn viewer_controller(
    store: &Arc<FakeStore>,
    view: &Arc<RecordingView>,
    interaction: &Arc<ScriptedInteraction>,
) -> TestController {
    LifecycleController::new(
        store.clone(),
        view.clone(),
        interaction.clone(),
        Privilege::Viewer,
    )
}

pub fn valid_fields() -> SubmissionFields {
    SubmissionFields {
        address: "Av. X 123".into(),
        comment: "Hay un bache enorme".into(),
        photo: Some(PhotoUpload::new("bache.jpg", vec![7; 2 * 1024 * 1024])),
        contact_email: None,
        coordinates: None,
    }
}
