/*!
# Migration - Rule-Ordered Source Rewriting

Rewrites legacy constant accessors (environment lookups, getter-style color,
size and font helpers, old validation/API classes) into references to the
centralized constant classes, one source file at a time.

## Architecture

- `RuleTable`: ordered, shadow-checked list of pattern→replacement rules
- `RuleFamily`: one migration concern (colors, sizes, ...) owning a table
- `SubstitutionApplier`: runs every family over a file's text, in order
- `ImportReconciler`: adds the canonical import / drops the legacy one
- `FileMigrator`: walks the tree, reads, transforms, writes, accumulates stats

## Example Usage

```rust,no_run
use migrate_core::{FileMigrator, MigrationConfig, RunMode, RunOutcome};

let config = MigrationConfig::default()
    .with_project_root("path/to/app")
    .with_mode(RunMode::Preview);
let migrator = FileMigrator::new(config)?;

let mut confirm = |_prompt: &str| true;
if let RunOutcome::Completed(summary) = migrator.run(&mut confirm)? {
    println!("{} files would change", summary.stats.files_changed);
}
# Ok::<(), migrate_core::MigrationError>(())
```
*/

use std::path::Path;

pub mod applier;
pub mod families;
pub mod file_migrator;
pub mod imports;
pub mod rules;
pub mod stats;

/// Per-file information that rule families may consult
#[derive(Debug, Clone, Default)]
pub struct FileContext {
    /// Root-relative, `/`-separated path of the file
    pub relative_path: Option<String>,
    /// Bare file name, e.g. `main.dart`
    pub file_name: Option<String>,
}

impl FileContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relative_path(mut self, relative_path: String) -> Self {
        self.file_name = Path::new(&relative_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.relative_path = Some(relative_path);
        self
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_string());
        self
    }

    /// Whether the file is named exactly `name`
    pub fn is_named(&self, name: &str) -> bool {
        self.file_name.as_deref() == Some(name)
    }

    /// Label used in logs and reports
    pub fn label(&self) -> &str {
        self.relative_path
            .as_deref()
            .or(self.file_name.as_deref())
            .unwrap_or("<text>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_derives_file_name() {
        let context = FileContext::new().with_relative_path("lib/main.dart".to_string());
        assert!(context.is_named("main.dart"));
        assert!(!context.is_named("lib/main.dart"));
        assert_eq!(context.label(), "lib/main.dart");
    }

    #[test]
    fn test_empty_context_label() {
        assert_eq!(FileContext::new().label(), "<text>");
        assert!(!FileContext::new().is_named("main.dart"));
    }
}
