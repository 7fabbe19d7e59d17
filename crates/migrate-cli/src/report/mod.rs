//! Console reporting for migration runs

pub mod notifier;
pub mod render;

pub use notifier::{BufferedNotifier, DefaultNotifier, ReportNotifier};
pub use render::{
    render_banner, render_changes, render_inspect, render_issues, render_next_steps, render_summary,
};
