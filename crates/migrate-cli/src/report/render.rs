//! Plain-text report blocks
//!
//! Every function returns a finished block; the caller decides where it goes.

use std::path::Path;

use migrate_core::migration::families::api_url::getter_for;
use migrate_core::{Category, FileTransformResult, MigrationSummary, RunMode};

const TOP_KEYS: usize = 10;
const MAX_LISTED_FILES: usize = 20;
const MAX_LISTED_REPLACEMENTS: usize = 5;

const CATEGORIES: [Category; 6] = [
    Category::ApiUrl,
    Category::Colors,
    Category::FontText,
    Category::Sizes,
    Category::Validation,
    Category::ApiClass,
];

fn rule() -> String {
    "=".repeat(70)
}

/// Heading printed before any file is touched
pub fn render_banner(mode: RunMode, project_root: &Path) -> String {
    let mut lines = vec![rule(), "🔄 Constant migration".to_string()];
    match mode {
        RunMode::Preview => lines.push("📋 DRY RUN - no files will be changed".to_string()),
        RunMode::Inspect => lines.push("🔍 CHECK - listing the files that would change".to_string()),
        RunMode::Apply => {}
    }
    lines.push(format!("Project: {}", project_root.display()));
    lines.push(rule());
    lines.join("\n")
}

/// Counters, per-category totals and the most frequent rule keys
pub fn render_summary(summary: &MigrationSummary) -> String {
    let stats = &summary.stats;
    let mut lines = vec![String::new(), rule()];
    lines.push(
        match summary.mode {
            RunMode::Apply => "✅ Migration complete",
            RunMode::Preview => "📊 Migration preview complete (DRY RUN)",
            RunMode::Inspect => "🔍 Change check complete",
        }
        .to_string(),
    );
    lines.push(rule());
    lines.push(format!("Files scanned:      {}", stats.files_scanned));
    lines.push(format!("Files changed:      {}", stats.files_changed));
    lines.push(format!("Total replacements: {}", stats.total_replacements));
    lines.push(format!("Imports added:      {}", stats.imports_added));
    lines.push(format!("Imports removed:    {}", stats.imports_removed));

    if stats.total_replacements > 0 {
        lines.push(String::new());
        lines.push("By category:".to_string());
        for category in CATEGORIES {
            let count = stats.category_count(category);
            if count > 0 {
                lines.push(format!("  - {category}: {count}"));
            }
        }
    }

    let keys = stats.keys_by_count();
    if !keys.is_empty() {
        lines.push(String::new());
        lines.push("📋 Replacements by rule:".to_string());
        for (key, count) in keys.iter().take(TOP_KEYS) {
            match getter_for(key) {
                Some(getter) => {
                    lines.push(format!("  • {key}"));
                    lines.push(format!("    → {getter}: {count}"));
                }
                None => lines.push(format!("  • {key}: {count}")),
            }
        }
        if keys.len() > TOP_KEYS {
            lines.push(format!("  ... and {} more", keys.len() - TOP_KEYS));
        }
    }

    lines.push(rule());
    if let Some(backup_dir) = &summary.backup_dir {
        lines.push(String::new());
        lines.push(format!("💾 Backup: {}", backup_dir.display()));
    }
    lines.join("\n")
}

fn file_header(change: &FileTransformResult, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(format!("📄 {}", change.path));
    if !change.import_changes.is_empty() {
        let imports: Vec<String> = change.import_changes.iter().map(ToString::to_string).collect();
        lines.push(format!("   [Import] {}", imports.join(", ")));
    }
}

fn replacement_lines(change: &FileTransformResult, limit: usize, lines: &mut Vec<String>) {
    for record in change.replacements.iter().take(limit) {
        lines.push(format!("  L{:4} | {}", record.line, record.original));
        lines.push(format!("         → {}", record.replacement));
    }
}

/// The first files and their first replacements
pub fn render_changes(summary: &MigrationSummary) -> String {
    if summary.changes.is_empty() {
        return String::new();
    }

    let mut lines = vec![String::new(), rule(), "📝 Changes".to_string(), rule()];
    for change in summary.changes.iter().take(MAX_LISTED_FILES) {
        file_header(change, &mut lines);
        replacement_lines(change, MAX_LISTED_REPLACEMENTS, &mut lines);
        if change.replacement_count() > MAX_LISTED_REPLACEMENTS {
            lines.push(format!(
                "         ... and {} more",
                change.replacement_count() - MAX_LISTED_REPLACEMENTS
            ));
        }
    }
    if summary.changes.len() > MAX_LISTED_FILES {
        lines.push(String::new());
        lines.push(format!("... and {} more files", summary.changes.len() - MAX_LISTED_FILES));
    }
    lines.join("\n")
}

/// Every file and every replacement
pub fn render_inspect(summary: &MigrationSummary) -> String {
    if summary.changes.is_empty() {
        return String::new();
    }

    let mut lines = vec![String::new(), rule(), "🔍 Files that would change".to_string(), rule()];
    for change in &summary.changes {
        file_header(change, &mut lines);
        replacement_lines(change, usize::MAX, &mut lines);
    }
    lines.join("\n")
}

/// Files that need a human look
pub fn render_issues(summary: &MigrationSummary) -> String {
    if summary.issues.is_empty() {
        return String::new();
    }

    let mut lines = vec![String::new(), rule(), "⚠️  Needs attention".to_string(), rule()];
    for issue in &summary.issues {
        lines.push(String::new());
        lines.push(format!("📄 {}", issue.file));
        lines.push(format!("   {}", issue.description));
        for example in &issue.examples {
            lines.push(format!("   e.g. {example}"));
        }
    }
    lines.join("\n")
}

/// What to do after this run
pub fn render_next_steps(summary: &MigrationSummary) -> String {
    let lines: &[&str] = match summary.mode {
        RunMode::Inspect => &["", "💡 To apply the migration run:", "   const-migrate"],
        RunMode::Preview => &[
            "",
            "💡 To apply the migration run:",
            "   const-migrate",
            "",
            "⚠️  To keep a copy of lib/ first:",
            "   const-migrate --backup",
        ],
        RunMode::Apply => &[
            "",
            "✅ Next steps:",
            "1. flutter analyze",
            "2. flutter build apk --debug",
            "3. Check for remaining dotenv usage:",
            "   grep -r \"dotenv.env\\[\" lib/",
            "4. Commit once everything builds",
        ],
    };
    lines.join("\n")
}
