//! Terminal implementations of the cart client's UI hooks.

use console::Term;
use joyeria_client::{Confirm, Notifier, Toast, ToastLevel};

use crate::output::Output;

/// Prints toasts through [`Output`] and asks confirmations with dialoguer.
pub struct TerminalUi {
    output: Output,
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(output: Output, assume_yes: bool) -> Self {
        Self { output, assume_yes }
    }
}

impl Notifier for TerminalUi {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Info => self.output.info(&toast.message),
            ToastLevel::Success => self.output.success(&toast.message),
            ToastLevel::Error => self.output.error(&toast.message),
        }
    }
}

impl Confirm for TerminalUi {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if self.output.is_json() || !Term::stderr().is_term() {
            self.output
                .warn("Confirmation needed but no terminal available; pass --yes");
            return false;
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
