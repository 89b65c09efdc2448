//! Output formatting utilities and the terminal view

use chrono::{DateTime, Utc};
use civic_lifecycle::{
    BusyAction, Notice, NoticeKind, Section, StatisticsProjection, ViewProjector,
};
use civic_types::{Report, ReportStatus, StatusFilter};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => print_single(&data, format),
    }
}

/// Print a single item in the specified format
pub fn print_single<T: Serialize + ?Sized>(data: &T, format: OutputFormat) {
    let rendered = match format {
        OutputFormat::Table | OutputFormat::Json => {
            serde_json::to_string_pretty(data).map_err(|e| e.to_string())
        }
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => print_error(&format!("Cannot render output: {}", e)),
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Human label for a creation time, relative to `now`
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - created_at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} h ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        created_at.format("%d/%m/%Y").to_string()
    }
}

/// Status coloured the way the dashboard shows it
pub fn status_badge(status: ReportStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        ReportStatus::Pending => label.yellow().bold(),
        ReportStatus::Verifying => label.blue().bold(),
        ReportStatus::Resolved => label.green().bold(),
        ReportStatus::Rejected => label.red().bold(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        text.to_string()
    }
}

/// Table row for report lists
#[derive(Debug, Serialize, Tabled)]
struct ReportRow {
    id: String,
    status: String,
    address: String,
    comment: String,
    created: String,
}

impl ReportRow {
    fn new(report: &Report, now: DateTime<Utc>) -> Self {
        Self {
            id: report.id.to_string(),
            status: report.status.to_string(),
            address: truncate(&report.address, 32),
            comment: truncate(&report.comment, 40),
            created: relative_time(report.created_at, now),
        }
    }
}

const BAR_WIDTH: usize = 30;

/// Renders lifecycle snapshots to the terminal
pub struct TerminalView {
    format: OutputFormat,
    photo_base: String,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    pub fn new(format: OutputFormat, photo_base: impl Into<String>) -> Self {
        Self {
            format,
            photo_base: photo_base.into(),
            spinner: Mutex::new(None),
        }
    }

    fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }

    fn print_rows(&self, reports: &[Report]) {
        let now = Utc::now();
        let rows: Vec<ReportRow> = reports.iter().map(|r| ReportRow::new(r, now)).collect();
        print_output(rows, OutputFormat::Table);
    }

    fn print_bar(&self, status: ReportStatus, count: u64, percentage: f64, width: &str) {
        let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = "█".repeat(filled.min(BAR_WIDTH));
        let rest = "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH));
        let bar = match status {
            ReportStatus::Pending => bar.yellow(),
            ReportStatus::Verifying => bar.blue(),
            ReportStatus::Resolved => bar.green(),
            ReportStatus::Rejected => bar.red(),
        };
        println!(
            "  {:<10} {}{} {:>5} ({})",
            status.as_str(),
            bar,
            rest.dimmed(),
            count,
            width
        );
    }
}

impl ViewProjector for TerminalView {
    fn show_section(&self, section: Section) {
        if !self.is_table() {
            return;
        }
        let title = match section {
            Section::Create => "New report",
            Section::List => "Reports",
            Section::Analytics => "Dashboard",
        };
        println!("\n{}", title.bold().underline());
    }

    fn render_reports(&self, filter: StatusFilter, reports: &[Report]) {
        if !self.is_table() {
            print_single(reports, self.format);
            return;
        }
        println!("{} {}", "Filter:".dimmed(), filter);
        self.print_rows(reports);
    }

    fn render_detail(&self, report: &Report, actions: &[ReportStatus]) {
        if !self.is_table() {
            print_single(report, self.format);
            return;
        }

        println!("{} {}", format!("Report #{}", report.id).bold(), status_badge(report.status));
        println!("  Address:  {}", report.address);
        println!("  Comment:  {}", report.comment);
        if let Some(email) = &report.contact_email {
            println!("  Contact:  {}", email);
        }
        if let Some(at) = report.coordinates {
            println!("  Location: {}", at);
        }
        println!("  Photo:    {}/uploads/{}", self.photo_base, report.photo);
        println!(
            "  Created:  {} ({})",
            report.created_at.format("%d/%m/%Y %H:%M"),
            relative_time(report.created_at, Utc::now())
        );
        if let Some(reason) = report.visible_rejection_reason() {
            println!("  {} {}", "Rejection reason:".red(), reason);
        }

        if !actions.is_empty() {
            let names: Vec<&str> = actions
                .iter()
                .filter(|s| **s != report.status)
                .map(|s| s.as_str())
                .collect();
            println!(
                "\n  {} civic report status {} <{}>",
                "Change status:".dimmed(),
                report.id,
                names.join("|")
            );
        }
    }

    fn render_statistics(&self, projection: &StatisticsProjection, recent: &[Report]) {
        if !self.is_table() {
            #[derive(Serialize)]
            struct Dashboard<'a> {
                statistics: &'a StatisticsProjection,
                recent: &'a [Report],
            }
            print_single(
                &Dashboard {
                    statistics: projection,
                    recent,
                },
                self.format,
            );
            return;
        }

        println!("  {} {}", "Total reports:".bold(), projection.total);
        for bar in &projection.bars {
            self.print_bar(bar.status, bar.count, bar.percentage, &bar.width());
        }
        println!("\n{}", "Recent reports".bold());
        self.print_rows(recent);
    }

    fn notify(&self, notice: Notice) {
        if !self.is_table() {
            // keep stdout parseable
            if notice.kind == NoticeKind::Error {
                print_error(&notice.message);
            } else {
                eprintln!("{}", notice.message);
            }
            return;
        }
        match notice.kind {
            NoticeKind::Success => print_success(&notice.message),
            NoticeKind::Error => print_error(&notice.message),
            NoticeKind::Info => print_info(&notice.message),
        }
    }

    fn set_busy(&self, action: BusyAction, busy: bool) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
        if busy {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(match action {
                BusyAction::Submit => "Sending report...",
                BusyAction::Transition => "Updating status...",
            });
            pb.enable_steady_tick(Duration::from_millis(100));
            *spinner = Some(pb);
        }
    }
}
