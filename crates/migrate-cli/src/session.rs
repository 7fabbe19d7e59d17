//! One invocation of the command-line tool, from options to exit code
//!
//! Kept apart from `main` so tests can drive a whole run with a scripted
//! [`Confirm`] and a [`BufferedNotifier`](crate::report::BufferedNotifier).

use std::path::{Path, PathBuf};

use anyhow::Result;
use migrate_core::launch_screen::{patch_storyboard_file, DEFAULT_STORYBOARD_PATH};
use migrate_core::{Confirm, FileMigrator, MigrationConfig, MigrationSummary, RunMode, RunOutcome};
use tracing::debug;

use crate::report::{self, ReportNotifier};

/// Process exit status for a run that changed something
pub const EXIT_CHANGED: i32 = 0;
/// Process exit status for a run with nothing to change, or a fatal setup error
pub const EXIT_UNCHANGED: i32 = 1;
/// Process exit status when the user declines to go ahead
pub const EXIT_CANCELLED: i32 = 0;

const PROCEED_PROMPT: &str = "\nContinue? (yes/no): ";

/// Options for the migration command
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub project_root: PathBuf,
    pub mode: RunMode,
    pub backup: bool,
    /// Backup location; a timestamped directory under the root when unset
    pub backup_dir: Option<PathBuf>,
    /// Skip the interactive confirmation before writing
    pub assume_yes: bool,
    /// Print the summary as JSON instead of the text report
    pub json: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            project_root: ".".into(),
            mode: RunMode::Apply,
            backup: false,
            backup_dir: None,
            assume_yes: false,
            json: false,
        }
    }
}

impl SessionOptions {
    fn config(&self) -> MigrationConfig {
        let config = MigrationConfig::default()
            .with_project_root(&self.project_root)
            .with_mode(self.mode)
            .with_backup(self.backup);
        match &self.backup_dir {
            Some(backup_dir) => config.with_backup_dir(backup_dir),
            None => config,
        }
    }

    /// Chatter goes to stderr when stdout carries the JSON summary
    fn say(&self, notifier: &dyn ReportNotifier, message: &str) {
        if self.json {
            notifier.on_error(message);
        } else {
            notifier.on_output(message);
        }
    }
}

/// Run the migration and return the process exit status.
pub fn run_migration(
    options: &SessionOptions,
    notifier: &dyn ReportNotifier,
    confirm: &mut dyn Confirm,
) -> Result<i32> {
    let config = options.config();
    if let Err(err) = config.validate() {
        notifier.on_error(&format!("❌ {err}"));
        return Ok(EXIT_UNCHANGED);
    }

    if !options.json {
        notifier.on_output(&report::render_banner(options.mode, &options.project_root));
    }

    if options.mode.writes_files() && !options.assume_yes {
        options.say(notifier, &write_warning(options.backup));
        if !confirm.confirm(PROCEED_PROMPT) {
            options.say(notifier, "Cancelled.");
            return Ok(EXIT_CANCELLED);
        }
    }

    let migrator = FileMigrator::new(config)?;
    let summary = match migrator.run(confirm)? {
        RunOutcome::Completed(summary) => summary,
        RunOutcome::Aborted => {
            options.say(notifier, "Cancelled.");
            return Ok(EXIT_CANCELLED);
        }
    };

    // Also reached without a prompt under --yes.
    if let Some(reason) = &summary.backup_error {
        notifier.on_error(&format!("⚠️  Backup failed ({reason}); files were rewritten without a backup."));
    }

    if options.json {
        notifier.on_output(&serde_json::to_string_pretty(&summary)?);
    } else {
        render(&summary, notifier);
    }

    debug!(changed = summary.has_changes(), "session finished");
    Ok(if summary.has_changes() {
        EXIT_CHANGED
    } else {
        EXIT_UNCHANGED
    })
}

fn write_warning(backup: bool) -> String {
    let mut lines = vec!["⚠️  This rewrites files in place!".to_string()];
    if !backup {
        lines.push("⚠️  --backup was not given.".to_string());
    }
    lines.push(String::new());
    lines.push("Before continuing, either:".to_string());
    lines.push("  • commit your work to git, or".to_string());
    lines.push("  • rerun with --backup".to_string());
    lines.join("\n")
}

fn render(summary: &MigrationSummary, notifier: &dyn ReportNotifier) {
    notifier.on_output(&report::render_summary(summary));
    match summary.mode {
        RunMode::Inspect => notifier.on_output(&report::render_inspect(summary)),
        RunMode::Apply | RunMode::Preview => notifier.on_output(&report::render_changes(summary)),
    }
    notifier.on_output(&report::render_issues(summary));
    notifier.on_output(&report::render_next_steps(summary));
}

/// Patch the iOS launch storyboard and return the process exit status.
///
/// `path` defaults to the standard storyboard location under `project_root`.
pub fn run_launch_screen(
    project_root: &Path,
    path: Option<PathBuf>,
    notifier: &dyn ReportNotifier,
) -> Result<i32> {
    let path = path.unwrap_or_else(|| project_root.join(DEFAULT_STORYBOARD_PATH));

    match patch_storyboard_file(&path)? {
        Some(patch) => {
            notifier.on_output(&format!(
                "✅ {} updated ({} image view(s) removed, {} background(s) recolored)",
                path.display(),
                patch.image_views_removed,
                patch.backgrounds_recolored
            ));
            Ok(EXIT_CHANGED)
        }
        None => {
            notifier.on_error(&format!("❌ {} not found", path.display()));
            Ok(EXIT_UNCHANGED)
        }
    }
}
