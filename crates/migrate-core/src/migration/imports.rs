/*!
# Import Reconciliation

After substitution a file may reference the canonical classes without
importing them, and may still import the environment loader it no longer
uses. The reconciler decides which of the two edits apply and performs them:
add first, then remove.
*/

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::{MigrationConfig, Result};

/// Which import edits a file needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    NoOp,
    AddOnly,
    RemoveOnly,
    AddAndRemove,
}

impl ImportAction {
    pub fn from_flags(add: bool, remove: bool) -> Self {
        match (add, remove) {
            (false, false) => ImportAction::NoOp,
            (true, false) => ImportAction::AddOnly,
            (false, true) => ImportAction::RemoveOnly,
            (true, true) => ImportAction::AddAndRemove,
        }
    }

    pub fn adds(self) -> bool {
        matches!(self, ImportAction::AddOnly | ImportAction::AddAndRemove)
    }

    pub fn removes(self) -> bool {
        matches!(self, ImportAction::RemoveOnly | ImportAction::AddAndRemove)
    }
}

/// An import edit that was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ImportChange {
    /// Canonical import inserted; `at_top` when the file had no import block
    Added { at_top: bool },
    /// Legacy import deleted
    Removed,
}

impl fmt::Display for ImportChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportChange::Added { at_top: false } => f.write_str("added constants import"),
            ImportChange::Added { at_top: true } => f.write_str("added constants import (at top)"),
            ImportChange::Removed => f.write_str("removed dotenv import"),
        }
    }
}

/// Result of reconciling one file's imports
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub text: String,
    pub action: ImportAction,
    pub changes: Vec<ImportChange>,
    /// Number of legacy usages still in the text
    pub residual_count: usize,
    /// Line snippets of those usages, in file order
    pub residuals: Vec<String>,
}

impl Reconciliation {
    pub fn has_residuals(&self) -> bool {
        self.residual_count > 0
    }
}

pub struct ImportReconciler {
    canonical_import: String,
    legacy_import: Regex,
    import_block: Regex,
    residual: Regex,
}

impl ImportReconciler {
    pub fn new(canonical_import: &str, legacy_import_pattern: &str, residual_pattern: &str) -> Result<Self> {
        Ok(Self {
            canonical_import: canonical_import.to_string(),
            // Whole line, trailing line break included, so removal leaves no gap.
            legacy_import: Regex::new(&format!(r"(?m)^[ \t]*{legacy_import_pattern}[ \t]*(?:\r?\n)?"))?,
            import_block: Regex::new(r"(?m)(?:^import\s[^\n]*;[ \t]*\r?\n)+")?,
            residual: Regex::new(residual_pattern)?,
        })
    }

    pub fn from_config(config: &MigrationConfig) -> Result<Self> {
        Self::new(
            &config.canonical_import,
            &config.legacy_import_pattern,
            &config.residual_pattern,
        )
    }

    pub fn has_canonical_import(&self, text: &str) -> bool {
        text.contains(&self.canonical_import)
    }

    pub fn has_legacy_import(&self, text: &str) -> bool {
        self.legacy_import.is_match(text)
    }

    /// Legacy usages left in `text`, each extended to the end of its line
    pub fn residuals(&self, text: &str) -> Vec<String> {
        self.residual
            .find_iter(text)
            .map(|found| {
                let rest = &text[found.start()..];
                let line_end = rest.find('\n').unwrap_or(rest.len());
                rest[..line_end].trim().to_string()
            })
            .collect()
    }

    /// Decide the edits for `text`.
    ///
    /// `needs_canonical` is whether a substitution that introduced a
    /// canonical reference happened in this file.
    pub fn plan(&self, text: &str, needs_canonical: bool) -> ImportAction {
        let add = needs_canonical && !self.has_canonical_import(text);
        let remove = needs_canonical && self.has_legacy_import(text) && !self.residual.is_match(text);
        ImportAction::from_flags(add, remove)
    }

    /// Plan and apply the import edits.
    pub fn reconcile(&self, text: &str, needs_canonical: bool) -> Reconciliation {
        let action = self.plan(text, needs_canonical);
        let residuals = self.residuals(text);
        let mut result = text.to_string();
        let mut changes = Vec::new();

        if action.adds() {
            let (with_import, at_top) = self.insert_canonical(&result);
            result = with_import;
            changes.push(ImportChange::Added { at_top });
        }

        if action.removes() {
            result = self.legacy_import.replace_all(&result, "").into_owned();
            changes.push(ImportChange::Removed);
        }

        Reconciliation {
            text: result,
            action,
            changes,
            residual_count: residuals.len(),
            residuals,
        }
    }

    /// Insert the canonical import after the first import block, or at the
    /// very top followed by a blank line when there is no block. The new
    /// line ends the way the surrounding lines do.
    fn insert_canonical(&self, text: &str) -> (String, bool) {
        match self.import_block.find(text) {
            Some(block) => {
                let newline = if block.as_str().ends_with("\r\n") { "\r\n" } else { "\n" };
                let mut result = String::with_capacity(text.len() + self.canonical_import.len() + 2);
                result.push_str(&text[..block.end()]);
                result.push_str(&self.canonical_import);
                result.push_str(newline);
                result.push_str(&text[block.end()..]);
                (result, false)
            }
            None => {
                let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
                (format!("{}{newline}{newline}{}", self.canonical_import, text), true)
            }
        }
    }
}
