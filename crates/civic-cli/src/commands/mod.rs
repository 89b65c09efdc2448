//! CLI command implementations

pub mod report;
pub mod stats;

use crate::client::HttpReportStore;
use crate::config::CliConfig;
use crate::output::{OutputFormat, TerminalView};
use crate::prompt::DialogInteraction;
use civic_lifecycle::{LifecycleController, Privilege};

/// Controller wired to the HTTP store and the terminal
pub type CliController = LifecycleController<HttpReportStore, TerminalView, DialogInteraction>;

/// Everything a command needs to build its controller
pub struct CommandContext {
    pub store: HttpReportStore,
    pub config: CliConfig,
    pub privilege: Privilege,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn controller(&self, assume_yes: bool) -> CliController {
        let view = TerminalView::new(self.format, self.store.base_url());
        LifecycleController::new(
            self.store.clone(),
            view,
            DialogInteraction::new(assume_yes),
            self.privilege.clone(),
        )
        .with_config(self.config.controller())
    }
}
