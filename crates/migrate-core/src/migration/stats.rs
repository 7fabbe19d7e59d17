/*!
# Migration Statistics

Per-file results, aggregate counters and the issue list a run reports.
*/

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use super::families::Category;
use super::imports::ImportChange;
use crate::RunMode;

/// Issues keep at most this many residual examples
pub const MAX_ISSUE_EXAMPLES: usize = 3;

/// One substitution, as it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementRecord {
    /// 1-based line in the text as it stood right before the rule ran
    pub line: usize,
    pub original: String,
    pub replacement: String,
    pub key: String,
    pub category: Category,
}

/// Everything that happened to one file
#[derive(Debug, Clone, Serialize)]
pub struct FileTransformResult {
    /// Root-relative, `/`-separated path
    pub path: String,
    #[serde(skip)]
    pub original: String,
    #[serde(skip)]
    pub transformed: String,
    pub replacements: Vec<ReplacementRecord>,
    pub import_changes: Vec<ImportChange>,
    pub changed: bool,
}

impl FileTransformResult {
    pub fn replacement_count(&self) -> usize {
        self.replacements.len()
    }
}

/// A file the run could not fully migrate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub file: String,
    pub description: String,
    pub examples: Vec<String>,
}

impl Issue {
    /// Legacy usages survived every rule
    pub fn residual(file: impl Into<String>, count: usize, examples: &[String]) -> Self {
        Self {
            file: file.into(),
            description: format!("legacy dotenv usage remains ({count})"),
            examples: examples.iter().take(MAX_ISSUE_EXAMPLES).cloned().collect(),
        }
    }

    /// The file could not be read, decoded or written
    pub fn processing(file: impl Into<String>, error: &dyn std::fmt::Display) -> Self {
        Self {
            file: file.into(),
            description: format!("processing failed: {error}"),
            examples: Vec::new(),
        }
    }
}

/// Run-wide counters; only ever added to
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateStats {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub total_replacements: usize,
    pub imports_added: usize,
    pub imports_removed: usize,
    pub by_key: BTreeMap<String, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

impl AggregateStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in a file that changed
    pub fn record(&mut self, result: &FileTransformResult) {
        if !result.changed {
            return;
        }
        self.files_changed += 1;
        self.total_replacements += result.replacement_count();
        for record in &result.replacements {
            *self.by_key.entry(record.key.clone()).or_insert(0) += 1;
            *self.by_category.entry(record.category).or_insert(0) += 1;
        }
        for change in &result.import_changes {
            match change {
                ImportChange::Added { .. } => self.imports_added += 1,
                ImportChange::Removed => self.imports_removed += 1,
            }
        }
    }

    /// Rule keys by descending count, ties broken alphabetically
    pub fn keys_by_count(&self) -> Vec<(&str, usize)> {
        let mut keys: Vec<(&str, usize)> = self
            .by_key
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        keys.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        keys
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct MigrationSummary {
    pub mode: RunMode,
    pub stats: AggregateStats,
    pub changes: Vec<FileTransformResult>,
    pub issues: Vec<Issue>,
    pub backup_dir: Option<PathBuf>,
    /// Why a requested backup was not made, when the run went on without it
    pub backup_error: Option<String>,
}

impl MigrationSummary {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            stats: AggregateStats::new(),
            changes: Vec::new(),
            issues: Vec::new(),
            backup_dir: None,
            backup_error: None,
        }
    }

    /// Whether at least one file changed (the run's success criterion)
    pub fn has_changes(&self) -> bool {
        self.stats.files_changed > 0
    }

    pub fn change_for(&self, path: &str) -> Option<&FileTransformResult> {
        self.changes.iter().find(|change| change.path == path)
    }

    pub fn issue_for(&self, path: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.file == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, category: Category) -> ReplacementRecord {
        ReplacementRecord {
            line: 1,
            original: format!("{key}()"),
            replacement: "X".to_string(),
            key: key.to_string(),
            category,
        }
    }

    fn result(changed: bool, replacements: Vec<ReplacementRecord>, import_changes: Vec<ImportChange>) -> FileTransformResult {
        FileTransformResult {
            path: "lib/a.dart".to_string(),
            original: String::new(),
            transformed: String::new(),
            replacements,
            import_changes,
            changed,
        }
    }

    #[test]
    fn test_record_counts_changed_files_only() {
        let mut stats = AggregateStats::new();
        stats.record(&result(false, vec![], vec![]));
        assert_eq!(stats.files_changed, 0);

        stats.record(&result(
            true,
            vec![record("getSize1", Category::Sizes), record("getSize1", Category::Sizes)],
            vec![ImportChange::Added { at_top: false }, ImportChange::Removed],
        ));
        assert_eq!(stats.files_changed, 1);
        assert_eq!(stats.total_replacements, 2);
        assert_eq!(stats.imports_added, 1);
        assert_eq!(stats.imports_removed, 1);
        assert_eq!(stats.by_key.get("getSize1"), Some(&2));
        assert_eq!(stats.category_count(Category::Sizes), 2);
        assert_eq!(stats.category_count(Category::Colors), 0);
    }

    #[test]
    fn test_keys_by_count_breaks_ties_by_name() {
        let mut stats = AggregateStats::new();
        stats.record(&result(
            true,
            vec![
                record("b", Category::Colors),
                record("a", Category::Colors),
                record("c", Category::Colors),
                record("c", Category::Colors),
            ],
            vec![],
        ));
        assert_eq!(stats.keys_by_count(), vec![("c", 2), ("a", 1), ("b", 1)]);
    }

    #[test]
    fn test_summary_json_omits_file_texts() {
        let mut summary = MigrationSummary::new(RunMode::Preview);
        let mut change = result(true, vec![record("getSize1", Category::Sizes)], vec![ImportChange::Removed]);
        change.original = "getSize1()".to_string();
        summary.stats.record(&change);
        summary.changes.push(change);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["mode"], "preview");
        assert_eq!(json["stats"]["by_category"]["sizes"], 1);
        assert_eq!(json["changes"][0]["import_changes"][0]["kind"], "removed");
        assert!(json["changes"][0].get("original").is_none());
    }

    #[test]
    fn test_residual_issue_keeps_three_examples() {
        let examples: Vec<String> = (0..5).map(|i| format!("dotenv.env['K{i}']")).collect();
        let issue = Issue::residual("lib/a.dart", 5, &examples);
        assert_eq!(issue.examples.len(), MAX_ISSUE_EXAMPLES);
        assert!(issue.description.contains('5'));
    }
}
