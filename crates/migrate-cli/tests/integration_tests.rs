use std::fs;
use std::path::Path;

use migrate_cli::session::{EXIT_CHANGED, EXIT_UNCHANGED};
use migrate_cli::{run_launch_screen, run_migration, AssumeYes, BufferedNotifier, SessionOptions};
use migrate_core::RunMode;
use tempfile::TempDir;

fn project(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

fn options(root: &Path, mode: RunMode) -> SessionOptions {
    SessionOptions {
        project_root: root.to_path_buf(),
        mode,
        ..Default::default()
    }
}

#[test]
fn test_confirmed_run_rewrites_and_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(root, &[("lib/a.dart", "final s = getSize24();\n")]);

    let notifier = BufferedNotifier::new();
    let mut prompts = Vec::new();
    let code = run_migration(&options(root, RunMode::Apply), &notifier, &mut |prompt: &str| {
        prompts.push(prompt.to_string());
        true
    })
    .unwrap();

    assert_eq!(code, EXIT_CHANGED);
    assert_eq!(prompts.len(), 1);
    assert_eq!(fs::read_to_string(root.join("lib/a.dart")).unwrap(), "final s = AppSizes.s24;\n");
    let output = notifier.output();
    assert!(output.contains("Files changed:      1"));
    assert!(output.contains("  L   1 | getSize24()"));
    assert!(output.contains("flutter analyze"));
}

#[test]
fn test_declined_run_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(root, &[("lib/a.dart", "final s = getSize24();\n")]);

    let notifier = BufferedNotifier::new();
    let code = run_migration(&options(root, RunMode::Apply), &notifier, &mut |_: &str| false).unwrap();

    assert_eq!(code, 0);
    assert_eq!(fs::read_to_string(root.join("lib/a.dart")).unwrap(), "final s = getSize24();\n");
    assert!(notifier.output().contains("Cancelled."));
}

#[test]
fn test_dry_run_never_prompts() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(root, &[("lib/a.dart", "final s = getSize24();\n")]);

    let notifier = BufferedNotifier::new();
    let code = run_migration(&options(root, RunMode::Preview), &notifier, &mut |_: &str| -> bool {
        panic!("dry run asked for confirmation")
    })
    .unwrap();

    assert_eq!(code, EXIT_CHANGED);
    assert_eq!(fs::read_to_string(root.join("lib/a.dart")).unwrap(), "final s = getSize24();\n");
    assert!(notifier.output().contains("DRY RUN"));
}

#[test]
fn test_nothing_to_change_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(root, &[("lib/a.dart", "class A {}\n")]);

    let notifier = BufferedNotifier::new();
    let code = run_migration(&options(root, RunMode::Inspect), &notifier, &mut |_: &str| true).unwrap();
    assert_eq!(code, EXIT_UNCHANGED);
}

#[test]
fn test_missing_lib_exits_one_before_prompting() {
    let temp_dir = TempDir::new().unwrap();
    let notifier = BufferedNotifier::new();
    let code = run_migration(
        &options(temp_dir.path(), RunMode::Apply),
        &notifier,
        &mut |_: &str| -> bool { panic!("prompted without a lib directory") },
    )
    .unwrap();

    assert_eq!(code, EXIT_UNCHANGED);
    assert!(notifier.errors().contains("Source directory not found"));
}

#[test]
fn test_json_summary() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(
        root,
        &[(
            "lib/a.dart",
            "import 'package:flutter_dotenv/flutter_dotenv.dart';\nfinal u = dotenv.env['BASE_URL'];\n",
        )],
    );

    let notifier = BufferedNotifier::new();
    let mut opts = options(root, RunMode::Preview);
    opts.json = true;
    run_migration(&opts, &notifier, &mut |_: &str| true).unwrap();

    let summary: serde_json::Value = serde_json::from_str(&notifier.output()).unwrap();
    assert_eq!(summary["mode"], "preview");
    assert_eq!(summary["stats"]["files_changed"], 1);
    assert_eq!(summary["changes"][0]["path"], "lib/a.dart");
    assert_eq!(summary["changes"][0]["replacements"][0]["key"], "BASE_URL");
    assert_eq!(summary["changes"][0]["import_changes"][1]["kind"], "removed");
}

#[test]
fn test_json_apply_keeps_stdout_parseable() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(root, &[("lib/a.dart", "final s = getSize24();\n")]);

    let notifier = BufferedNotifier::new();
    let mut opts = options(root, RunMode::Apply);
    opts.json = true;
    let code = run_migration(&opts, &notifier, &mut |_: &str| true).unwrap();

    assert_eq!(code, EXIT_CHANGED);
    let summary: serde_json::Value = serde_json::from_str(&notifier.output()).unwrap();
    assert_eq!(summary["mode"], "apply");
    assert!(notifier.errors().contains("rewrites files in place"));
}

#[test]
fn test_json_cancel_goes_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(root, &[("lib/a.dart", "final s = getSize24();\n")]);

    let notifier = BufferedNotifier::new();
    let mut opts = options(root, RunMode::Apply);
    opts.json = true;
    run_migration(&opts, &notifier, &mut |_: &str| false).unwrap();

    assert!(notifier.output().is_empty());
    assert!(notifier.errors().contains("Cancelled."));
}

#[test]
fn test_assume_yes_reports_failed_backup() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    project(root, &[("lib/a.dart", "final s = getSize24();\n"), ("taken/keep.txt", "mine")]);

    let notifier = BufferedNotifier::new();
    let mut opts = options(root, RunMode::Apply);
    opts.backup = true;
    opts.backup_dir = Some(root.join("taken"));
    opts.assume_yes = true;
    let code = run_migration(&opts, &notifier, &mut AssumeYes).unwrap();

    assert_eq!(code, EXIT_CHANGED);
    assert_eq!(fs::read_to_string(root.join("lib/a.dart")).unwrap(), "final s = AppSizes.s24;\n");
    assert!(notifier.errors().contains("without a backup"));
}

#[test]
fn test_launch_screen_command() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let notifier = BufferedNotifier::new();

    assert_eq!(run_launch_screen(root, None, &notifier).unwrap(), EXIT_UNCHANGED);
    assert!(notifier.errors().contains("not found"));

    project(
        root,
        &[(
            "ios/Runner/Base.lproj/LaunchScreen.storyboard",
            r#"<imageView image="LaunchImage" id="a"></imageView><color red="1" green="1" blue="1"/>"#,
        )],
    );
    assert_eq!(run_launch_screen(root, None, &notifier).unwrap(), EXIT_CHANGED);
    assert_eq!(
        fs::read_to_string(root.join("ios/Runner/Base.lproj/LaunchScreen.storyboard")).unwrap(),
        r#"<!-- LaunchImage removed --><color red="0" green="0.749" blue="1"/>"#
    );
}
