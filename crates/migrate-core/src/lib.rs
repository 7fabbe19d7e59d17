//! # Migrate Core
//!
//! Core implementation of the constant-accessor migration engine, including:
//! - Ordered rule tables for each migration concern (API URLs, colors,
//!   font/text, sizes, validation and API classes)
//! - The substitution applier and import reconciler
//! - File-level orchestration with aggregate statistics and issue tracking
//! - File-system collaborators (source walker, backup, legacy decoding)
//! - The iOS launch-screen storyboard patcher
//!
//! This crate provides the engine; the `const-migrate` binary in
//! `migrate-cli` is a thin front end over it.

#![warn(clippy::all)]

use std::path::{Path, PathBuf};

pub mod confirm;
pub mod fs;
pub mod launch_screen;
pub mod migration;

// Re-export commonly used types
pub use confirm::Confirm;
pub use migration::{
    families::{standard_families, Category, RuleFamily},
    file_migrator::{FileMigrator, FileOutcome, RunOutcome},
    imports::{ImportAction, ImportChange, ImportReconciler, Reconciliation},
    rules::{Rule, RuleTable},
    stats::{AggregateStats, FileTransformResult, Issue, MigrationSummary, ReplacementRecord},
    applier::{Substitution, SubstitutionApplier},
    FileContext,
};

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Import line that makes `ApiConfig` and the other canonical classes visible
pub const CANONICAL_IMPORT: &str = "import 'package:vms_app/core/constants/constants.dart';";

/// Import of the environment loader that the canonical classes replace
pub const LEGACY_IMPORT_PATTERN: &str =
    r#"import\s+['"]package:flutter_dotenv/flutter_dotenv\.dart['"];"#;

/// Any remaining direct environment lookup
pub const RESIDUAL_PATTERN: &str = r"dotenv\.env\[";

/// Initialize tracing for the migration engine.
///
/// `RUST_LOG` wins when set; otherwise `migrate_core` logs at `info`, or at
/// `debug` when `verbose` is true. Output goes to stderr so reports written
/// to stdout stay machine-readable.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "migrate_core={default_level},migrate_cli={default_level}"
        ))
    });

    // A second initialization (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// How a run treats the files it would change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Rewrite files in place
    #[default]
    Apply,
    /// Compute everything, write nothing
    Preview,
    /// Like `Preview`, with a per-line listing of every match
    Inspect,
}

impl RunMode {
    pub fn writes_files(self) -> bool {
        matches!(self, RunMode::Apply)
    }
}

/// Migration run configuration
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Project root that contains the source directory
    pub project_root: PathBuf,
    /// Source directory relative to the project root
    pub source_dir: PathBuf,
    /// Extension of the files to migrate (without the dot)
    pub extension: String,
    /// Root-relative, `/`-separated paths that are never touched
    pub exclusions: Vec<String>,
    /// Write, preview or inspect
    pub mode: RunMode,
    /// Copy the source directory before the first write
    pub backup: bool,
    /// Where the backup goes; a timestamped directory under the project
    /// root when unset
    pub backup_dir: Option<PathBuf>,
    /// Import line added when a canonical reference is introduced
    pub canonical_import: String,
    /// Pattern for the legacy import line that may be removed
    pub legacy_import_pattern: String,
    /// Pattern for legacy usages that block removal of the legacy import
    pub residual_pattern: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            project_root: ".".into(),
            source_dir: "lib".into(),
            extension: "dart".to_string(),
            exclusions: vec!["lib/core/constants/api_config.dart".to_string()],
            mode: RunMode::Apply,
            backup: false,
            backup_dir: None,
            canonical_import: CANONICAL_IMPORT.to_string(),
            legacy_import_pattern: LEGACY_IMPORT_PATTERN.to_string(),
            residual_pattern: RESIDUAL_PATTERN.to_string(),
        }
    }
}

impl MigrationConfig {
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn with_backup_dir(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(backup_dir.into());
        self
    }

    /// Absolute-or-relative path of the directory that gets migrated
    pub fn source_root(&self) -> PathBuf {
        self.project_root.join(&self.source_dir)
    }

    /// Check the environment preconditions; failing either is fatal.
    pub fn validate(&self) -> Result<()> {
        if !self.project_root.exists() {
            return Err(MigrationError::ProjectRootMissing {
                path: self.project_root.clone(),
            });
        }
        let source_root = self.source_root();
        if !source_root.is_dir() {
            return Err(MigrationError::SourceDirMissing { path: source_root });
        }
        Ok(())
    }

    /// Whether a root-relative path is on the exclusion list
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclusions.iter().any(|excluded| excluded == relative)
    }
}

/// Error types for migration operations
#[derive(thiserror::Error, Debug)]
pub enum MigrationError {
    /// The project root does not exist
    #[error("Project root not found: {}", path.display())]
    ProjectRootMissing { path: PathBuf },

    /// The project root exists but has no source directory
    #[error("Source directory not found: {}", path.display())]
    SourceDirMissing { path: PathBuf },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither UTF-8 nor the legacy encoding could decode a file
    #[error("Could not decode {} as UTF-8 or {encoding}", path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    /// A rule pattern failed to compile
    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A rule table is ordered so that an earlier rule hides a later one
    #[error("Rule table '{table}': rule '{earlier}' shadows later rule '{later}'")]
    ShadowedRule {
        table: String,
        earlier: String,
        later: String,
    },

    /// Copying the source tree before mutation failed
    #[error("Backup to {} failed: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the source tree failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl MigrationError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        MigrationError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for migration operations
pub type Result<T> = std::result::Result<T, MigrationError>;
