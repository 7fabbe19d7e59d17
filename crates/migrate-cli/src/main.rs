use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use migrate_core::{init_tracing, Confirm, RunMode};
use migrate_cli::{run_launch_screen, run_migration, AssumeYes, DefaultNotifier, SessionOptions, TerminalConfirm};

fn cli() -> Command {
    Command::new("const-migrate")
        .version(migrate_core::VERSION)
        .about("Migrate legacy constant accessors in a Flutter project to the centralized constant classes")
        .arg(
            Arg::new("project-root")
                .long("project-root")
                .value_name("PATH")
                .help("Flutter project root")
                .default_value(".")
                .global(true),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Show what would change without writing files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("List every file and line that would change, without writing")
                .action(ArgAction::SetTrue)
                .conflicts_with("dry-run"),
        )
        .arg(
            Arg::new("backup")
                .long("backup")
                .help("Copy lib/ to a timestamped directory before writing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("backup-dir")
                .long("backup-dir")
                .value_name("PATH")
                .help("Where --backup copies lib/ to; must not exist yet")
                .requires("backup"),
        )
        .arg(
            Arg::new("yes")
                .long("yes")
                .short('y')
                .help("Do not ask for confirmation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the run summary as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("launch-screen")
                .about("Remove the LaunchImage view and recolor the iOS launch storyboard")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .value_name("FILE")
                        .help("Storyboard to patch (default: ios/Runner/Base.lproj/LaunchScreen.storyboard)"),
                ),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Initialize logging
    init_tracing(matches.get_flag("verbose"));

    let project_root = matches
        .get_one::<String>("project-root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let notifier = DefaultNotifier::new();

    let code = if let Some(launch) = matches.subcommand_matches("launch-screen") {
        let path = launch.get_one::<String>("path").map(PathBuf::from);
        run_launch_screen(&project_root, path, &notifier)?
    } else {
        let mode = if matches.get_flag("check") {
            RunMode::Inspect
        } else if matches.get_flag("dry-run") {
            RunMode::Preview
        } else {
            RunMode::Apply
        };
        let options = SessionOptions {
            project_root,
            mode,
            backup: matches.get_flag("backup"),
            backup_dir: matches.get_one::<String>("backup-dir").map(PathBuf::from),
            assume_yes: matches.get_flag("yes"),
            json: matches.get_flag("json"),
        };

        let mut confirm: Box<dyn Confirm> = if options.assume_yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalConfirm::new()?)
        };
        run_migration(&options, &notifier, confirm.as_mut())?
    };

    std::process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_launch_screen_subcommand() {
        let matches = cli()
            .try_get_matches_from(["const-migrate", "launch-screen", "--path", "x.storyboard"])
            .unwrap();
        let launch = matches.subcommand_matches("launch-screen").unwrap();
        assert_eq!(launch.get_one::<String>("path").unwrap(), "x.storyboard");
    }

    #[test]
    fn test_backup_dir_requires_backup() {
        assert!(cli()
            .try_get_matches_from(["const-migrate", "--backup-dir", "saved"])
            .is_err());
        let matches = cli()
            .try_get_matches_from(["const-migrate", "--backup", "--backup-dir", "saved"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("backup-dir").unwrap(), "saved");
    }

    #[test]
    fn test_check_conflicts_with_dry_run() {
        assert!(cli()
            .try_get_matches_from(["const-migrate", "--check", "--dry-run"])
            .is_err());
    }
}
