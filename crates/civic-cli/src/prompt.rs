//! Terminal dialogs

use crate::output::print_warning;
use civic_lifecycle::Interaction;
use civic_types::RuleViolation;
use dialoguer::{Confirm, Input};

/// Asks the user through dialoguer prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogInteraction {
    /// Answer yes to every confirmation (`--yes`)
    assume_yes: bool,
}

impl DialogInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Interaction for DialogInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn prompt_rejection_reason(&self, previous: Option<&RuleViolation>) -> Option<String> {
        if let Some(violation) = previous {
            print_warning(&violation.to_string());
        }

        let answer: String = Input::new()
            .with_prompt("Rejection reason (empty to cancel)")
            .allow_empty(true)
            .interact_text()
            .ok()?;

        if answer.trim().is_empty() {
            None
        } else {
            Some(answer)
        }
    }
}
