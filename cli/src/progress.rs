use crate::logger::Logger;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{stderr, IsTerminal};
use std::time::Duration;

/// Status line of a single provisioning step
///
/// Prints cargo-like stage lines to stderr, so stdout stays clean for the result.
#[derive(Clone)]
pub struct Progress {
    progress_bar: ProgressBar,
    resource_name: String,
}

pub enum ProgressStatus {
    Success,
    Error,
}

impl Progress {
    pub fn new(resource_name: &str) -> Self {
        let progress_bar = Logger::multi_progress().add(ProgressBar::new_spinner());
        progress_bar.set_style(
            ProgressStyle::with_template("{msg}").unwrap_or(ProgressStyle::default_spinner()),
        );

        Self {
            progress_bar,
            resource_name: resource_name.to_string(),
        }
    }

    /// A spinner showing the latest line of a running process
    pub fn spinner() -> Self {
        let progress_bar = Logger::multi_progress().add(ProgressBar::new_spinner());

        progress_bar.set_style(
            ProgressStyle::with_template("{spinner:.dim} {wide_msg:.dim}")
                .unwrap_or(ProgressStyle::default_spinner()),
        );

        progress_bar.enable_steady_tick(Duration::from_millis(120));

        Self {
            progress_bar,
            resource_name: String::new(),
        }
    }

    pub fn log_stage(&self, stage: &str) {
        let msg = format!(
            "{} {}",
            console::style(self.with_padding(stage)).green().bold(),
            self.resource_name,
        );

        self.println(msg);
    }

    /// Replace the spinner message with a line of process output
    pub fn line(&self, line: &str) {
        // Trim the line to 48 characters with ellipsis if necessary
        let line = line.trim();

        let line_trimmed = if line.chars().count() > 48 {
            format!("{}...", line.chars().take(45).collect::<String>())
        } else {
            line.to_string()
        };

        self.progress_bar.set_message(line_trimmed);
    }

    pub fn finish(&self, stage: &str, status: ProgressStatus) {
        let stage = console::style(self.with_padding(stage)).bold();

        let stage = match status {
            ProgressStatus::Success => stage.green(),
            ProgressStatus::Error => stage.red(),
        };

        self.println(format!("{} {}", stage, self.resource_name));
        self.clear();
    }

    pub fn clear(&self) {
        self.progress_bar.finish_and_clear();
    }

    fn println(&self, msg: String) {
        // Terminal or CI/CD?
        if stderr().is_terminal() {
            self.progress_bar.println(msg);
        } else {
            self.progress_bar.suspend(|| eprintln!("{msg}"));
        }
    }

    // Required padding to make the message centered in the cargo-like style
    fn with_padding(&self, message: &str) -> String {
        format!("{message:>12}")
    }
}
