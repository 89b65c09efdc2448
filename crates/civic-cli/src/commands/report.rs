//! Report commands

use super::CommandContext;
use crate::error::{CliError, CliResult};
use crate::output::{print_error, print_warning};
use civic_lifecycle::{
    LifecycleError, PhotoUpload, SubmissionFields, TransitionOutcome, UiSessionState,
};
use civic_types::{rules, Coordinates, ReportId, ReportStatus, StatusFilter};
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Submit a new report
    Create {
        /// Where the problem is
        #[arg(short, long)]
        address: String,

        /// What is wrong
        #[arg(short = 'm', long)]
        comment: String,

        /// Photo of the problem (JPG, PNG or WEBP, up to 5MB)
        #[arg(short, long)]
        photo: PathBuf,

        /// Contact email for follow-up
        #[arg(short, long)]
        email: Option<String>,

        /// Latitude of the problem
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the problem
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// List reports, newest first
    List {
        /// Filter by status (pending, verifying, resolved, rejected, all)
        #[arg(short, long, default_value = "all")]
        status: String,
    },

    /// Show one report
    Show {
        /// Report ID
        id: String,
    },

    /// Change a report's status (administrators only)
    Status {
        /// Report ID
        id: String,

        /// Target status
        status: String,

        /// Rejection reason, required when rejecting
        #[arg(short, long)]
        reason: Option<String>,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Reject a report (administrators only)
    Reject {
        /// Report ID
        id: String,

        /// Rejection reason, at least 10 characters
        #[arg(short, long)]
        reason: Option<String>,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Execute a report command
pub async fn execute(command: ReportCommands, ctx: &CommandContext) -> CliResult<()> {
    match command {
        ReportCommands::Create {
            address,
            comment,
            photo,
            email,
            lat,
            lng,
        } => {
            let coordinates = match lat.zip(lng) {
                Some((lat, lng)) => Some(Coordinates::new(lat, lng).map_err(reject_locally)?),
                None => None,
            };
            let fields = SubmissionFields {
                address,
                comment,
                photo: load_photo(&photo).await,
                contact_email: email,
                coordinates,
            };

            let controller = ctx.controller(false);
            let mut session = UiSessionState::new();
            controller.submit_report(&mut session, &fields).await?;
            Ok(())
        }

        ReportCommands::List { status } => {
            let filter: StatusFilter = status
                .parse()
                .map_err(|e: civic_types::UnknownStatusError| CliError::InvalidInput(e.to_string()))?;

            let controller = ctx.controller(false);
            let mut session = UiSessionState::new();
            controller.set_filter(&mut session, filter).await?;
            Ok(())
        }

        ReportCommands::Show { id } => {
            let controller = ctx.controller(false);
            let mut session = UiSessionState::new();
            controller
                .open_detail(&mut session, &ReportId::new(id))
                .await?;
            Ok(())
        }

        ReportCommands::Status {
            id,
            status,
            reason,
            yes,
        } => {
            let target: ReportStatus = status
                .parse()
                .map_err(|e: civic_types::UnknownStatusError| CliError::InvalidInput(e.to_string()))?;
            transition(ctx, id, target, reason, yes).await
        }

        ReportCommands::Reject { id, reason, yes } => {
            transition(ctx, id, ReportStatus::Rejected, reason, yes).await
        }
    }
}

async fn transition(
    ctx: &CommandContext,
    id: String,
    target: ReportStatus,
    reason: Option<String>,
    yes: bool,
) -> CliResult<()> {
    let controller = ctx.controller(yes);
    let mut session = UiSessionState::new();

    match controller
        .request_transition(&mut session, &ReportId::new(id), target, reason)
        .await?
    {
        TransitionOutcome::Applied { .. } => Ok(()),
        TransitionOutcome::Cancelled => {
            print_warning("Aborted");
            Ok(())
        }
    }
}

/// Load the photo for submission.
///
/// A file that cannot be read counts as no photo, so the validator reports
/// it in its usual order.
async fn load_photo(path: &Path) -> Option<PhotoUpload> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot read photo");
            return None;
        }
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string());

    let upload = PhotoUpload::new(file_name.clone(), bytes);
    Some(match content_type(&file_name) {
        Some(mime) => upload.with_content_type(mime),
        None => upload,
    })
}

fn content_type(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Show a rule violation caught before the controller runs
fn reject_locally(violation: rules::RuleViolation) -> CliError {
    print_error(&violation.to_string());
    CliError::Lifecycle(LifecycleError::from(violation))
}
