//! Dashboard command

use super::CommandContext;
use crate::error::{CliError, CliResult};
use crate::output::print_error;
use civic_lifecycle::{LifecycleError, Section, UiSessionState};

/// Show the statistics dashboard
pub async fn execute(ctx: &CommandContext) -> CliResult<()> {
    let controller = ctx.controller(false);
    let mut session = UiSessionState::new();

    match controller.show_section(&mut session, Section::Analytics).await {
        Ok(()) => Ok(()),
        Err(e @ LifecycleError::NotPrivileged) => {
            print_error(&format!("{}. Pass --admin-token to see the dashboard.", e));
            Err(CliError::Lifecycle(e))
        }
        Err(e) => Err(e.into()),
    }
}
