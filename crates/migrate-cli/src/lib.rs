//! Const Migrate - command-line front end for the constant-accessor
//! migration engine
//!
//! This crate provides the interactive pieces around `migrate-core`: the
//! terminal confirmation prompt, console report rendering and the session
//! flow that turns a run into a process exit status.

pub mod confirm;
pub mod report;
pub mod session;

// Re-export commonly used types for convenience
pub use confirm::{AssumeYes, TerminalConfirm};
pub use report::{BufferedNotifier, DefaultNotifier, ReportNotifier};
pub use session::{run_launch_screen, run_migration, SessionOptions};
