/*!
# FileMigrator - File-level Orchestration

Walks the source tree and pushes each candidate file through substitution
and import reconciliation, one file at a time. Depending on the run mode the
result is written back or only reported. A file that cannot be read, decoded
or written becomes an issue; the batch keeps going.
*/

use std::path::Path;

use tracing::{debug, info, warn};

use super::applier::SubstitutionApplier;
use super::imports::ImportReconciler;
use super::stats::{FileTransformResult, Issue, MigrationSummary};
use super::FileContext;
use crate::confirm::Confirm;
use crate::fs::{create_backup, read_source, write_source, SourceWalker};
use crate::{MigrationConfig, MigrationError, Result};

const BACKUP_FAILED_PROMPT: &str = "Backup failed. Continue without a backup? (yes/no): ";

/// Pure transformation of one file's text
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub result: FileTransformResult,
    /// Legacy usages that survived, if any
    pub issue: Option<Issue>,
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed(MigrationSummary),
    /// The user declined to continue after a failed backup
    Aborted,
}

pub struct FileMigrator {
    config: MigrationConfig,
    applier: SubstitutionApplier,
    reconciler: ImportReconciler,
}

impl FileMigrator {
    /// Migrator over the standard rule families
    pub fn new(config: MigrationConfig) -> Result<Self> {
        Ok(Self {
            reconciler: ImportReconciler::from_config(&config)?,
            applier: SubstitutionApplier::standard()?,
            config,
        })
    }

    /// Substitute, then reconcile imports. No I/O.
    pub fn transform_text(&self, text: &str, context: &FileContext) -> FileOutcome {
        let substitution = self.applier.apply(text, context);
        let reconciliation = self
            .reconciler
            .reconcile(&substitution.text, substitution.needs_canonical_import);

        let path = context.label().to_string();
        let issue = reconciliation
            .has_residuals()
            .then(|| Issue::residual(path.clone(), reconciliation.residual_count, &reconciliation.residuals));

        let changed = reconciliation.text != text;
        FileOutcome {
            result: FileTransformResult {
                path,
                original: text.to_string(),
                transformed: reconciliation.text,
                replacements: substitution.records,
                import_changes: reconciliation.changes,
                changed,
            },
            issue,
        }
    }

    /// Migrate one file into `summary`. Failures are recorded, not returned.
    pub fn migrate_file(&self, path: &Path, summary: &mut MigrationSummary) {
        let relative = SourceWalker::new(&self.config).relative(path);
        summary.stats.files_scanned += 1;

        let decoded = match read_source(path) {
            Ok(decoded) => decoded,
            Err(err) => return skip(summary, relative, &err),
        };
        let context = FileContext::new().with_relative_path(relative.clone());
        let outcome = self.transform_text(&decoded.text, &context);

        let written = if outcome.result.changed && self.config.mode.writes_files() {
            write_source(path, &outcome.result.transformed)
        } else {
            Ok(())
        };
        self.record(outcome, written, summary);
    }

    /// Fold one file's outcome into `summary`. The residual issue is kept
    /// even when the write failed; the change itself is not.
    fn record(&self, outcome: FileOutcome, written: Result<()>, summary: &mut MigrationSummary) {
        let relative = outcome.result.path.clone();
        if let Some(issue) = outcome.issue {
            warn!(file = %relative, "{}", issue.description);
            summary.issues.push(issue);
        }
        if let Err(err) = written {
            return skip(summary, relative, &err);
        }
        if outcome.result.changed {
            info!(
                file = %relative,
                replacements = outcome.result.replacement_count(),
                written = self.config.mode.writes_files(),
                "file migrated"
            );
            summary.stats.record(&outcome.result);
            summary.changes.push(outcome.result);
        }
    }

    /// Run the whole migration.
    ///
    /// Environment problems are returned as errors before anything is
    /// touched. `confirm` is only consulted when a requested backup fails.
    pub fn run(&self, confirm: &mut dyn Confirm) -> Result<RunOutcome> {
        self.config.validate()?;
        let mut summary = MigrationSummary::new(self.config.mode);

        if self.config.backup && self.config.mode.writes_files() {
            match create_backup(&self.config) {
                Ok(backup_dir) => summary.backup_dir = Some(backup_dir),
                Err(err) => {
                    warn!(error = %err, "backup failed");
                    if !confirm.confirm(BACKUP_FAILED_PROMPT) {
                        return Ok(RunOutcome::Aborted);
                    }
                    summary.backup_error = Some(err.to_string());
                }
            }
        }

        for family in self.applier.families() {
            debug!(family = family.name(), "{}", family.description());
        }

        let walker = SourceWalker::new(&self.config);
        let found = walker.collect();
        info!(files = found.files.len(), mode = ?self.config.mode, "migration started");

        for err in found.unreadable {
            let location = err
                .path()
                .map(|path| walker.relative(path))
                .unwrap_or_else(|| self.config.source_dir.to_string_lossy().into_owned());
            summary.issues.push(Issue::processing(location, &MigrationError::Walk(err)));
        }
        for path in &found.files {
            self.migrate_file(path, &mut summary);
        }

        info!(
            scanned = summary.stats.files_scanned,
            changed = summary.stats.files_changed,
            replacements = summary.stats.total_replacements,
            "migration finished"
        );
        Ok(RunOutcome::Completed(summary))
    }
}

fn skip(summary: &mut MigrationSummary, file: String, err: &MigrationError) {
    warn!(file = %file, error = %err, "file skipped");
    summary.issues.push(Issue::processing(file, err));
}
