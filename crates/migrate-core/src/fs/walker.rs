use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::MigrationConfig;

/// Candidate files plus the entries the walk could not read
#[derive(Debug, Default)]
pub struct SourceFiles {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<walkdir::Error>,
}

/// Finds the files a run should consider
///
/// Every file under `<project_root>/<source_dir>` with the configured
/// extension, minus the exclusion list, sorted by path.
pub struct SourceWalker<'a> {
    config: &'a MigrationConfig,
}

impl<'a> SourceWalker<'a> {
    pub fn new(config: &'a MigrationConfig) -> Self {
        Self { config }
    }

    /// Walk the source tree. An unreadable directory or entry is skipped
    /// and reported, never fatal.
    pub fn collect(&self) -> SourceFiles {
        let mut found = SourceFiles::default();

        for entry in WalkDir::new(self.config.source_root()).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    found.unreadable.push(err);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.has_extension(entry.path()) {
                continue;
            }
            if self.config.is_excluded(&self.relative(entry.path())) {
                continue;
            }
            found.files.push(entry.into_path());
        }

        found.files.sort();
        found
    }

    /// Root-relative path with `/` separators, used for reports and exclusions
    pub fn relative(&self, path: &Path) -> String {
        relative_to(&self.config.project_root, path)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.config.extension))
            .unwrap_or(false)
    }
}

/// `path` relative to `root`, `/`-separated; `path` itself when outside `root`
pub fn relative_to(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
