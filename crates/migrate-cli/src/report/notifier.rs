//! Output notification for migration reports
//!
//! The session never prints directly. It hands finished report blocks to a
//! [`ReportNotifier`], so the console, a log file or a test buffer can sit
//! behind it.

use std::sync::Mutex;

/// Trait for handling report output
pub trait ReportNotifier: Send + Sync {
    /// Handle regular output
    fn on_output(&self, content: &str);

    /// Handle error output
    fn on_error(&self, content: &str);
}

/// Default console-based notifier
pub struct DefaultNotifier;

impl DefaultNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ReportNotifier for DefaultNotifier {
    fn on_output(&self, content: &str) {
        if !content.is_empty() {
            println!("{content}");
        }
    }

    fn on_error(&self, content: &str) {
        eprintln!("{content}");
    }
}

impl Default for DefaultNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Notifier that keeps everything in memory
#[derive(Default)]
pub struct BufferedNotifier {
    output: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl BufferedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All regular output, joined by newlines
    pub fn output(&self) -> String {
        self.output.lock().map(|lines| lines.join("\n")).unwrap_or_default()
    }

    /// All error output, joined by newlines
    pub fn errors(&self) -> String {
        self.errors.lock().map(|lines| lines.join("\n")).unwrap_or_default()
    }
}

impl ReportNotifier for BufferedNotifier {
    fn on_output(&self, content: &str) {
        if let Ok(mut lines) = self.output.lock() {
            lines.push(content.to_string());
        }
    }

    fn on_error(&self, content: &str) {
        if let Ok(mut lines) = self.errors.lock() {
            lines.push(content.to_string());
        }
    }
}
