//! Terminal-backed yes/no prompts

use migrate_core::confirm::{is_affirmative, Confirm};
use rustyline::DefaultEditor;
use tracing::warn;

/// Asks on the terminal; an unreadable answer counts as "no"
pub struct TerminalConfirm {
    editor: DefaultEditor,
}

impl TerminalConfirm {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self.editor.readline(prompt) {
            Ok(answer) => is_affirmative(&answer),
            Err(err) => {
                warn!(error = %err, "no answer read");
                false
            }
        }
    }
}

/// Answers every prompt the same way (`--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}
