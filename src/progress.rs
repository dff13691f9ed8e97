use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Progress indicator manager
pub struct ProgressManager {
    enabled: bool,
    verbose: bool,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(quiet: bool, verbose: bool) -> Self {
        // Spinners go to stderr; skip them when it is not a terminal
        let enabled = !quiet && io::stderr().is_terminal();

        Self { enabled, verbose }
    }

    /// Create a spinner shown while a request is in flight
    pub fn create_request_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Some(pb)
    }

    /// Show a simple message (for verbose mode)
    pub fn show_message(&self, message: &str) {
        if self.verbose && self.enabled {
            eprintln!("🔍 {}", message);
        }
    }

    /// Check if progress is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Spinner tied to a single API request
pub struct ApiProgress {
    spinner: Option<ProgressBar>,
}

impl ApiProgress {
    pub fn new(manager: &ProgressManager, message: &str) -> Self {
        manager.show_message(message);
        Self {
            spinner: manager.create_request_spinner(message),
        }
    }

    /// Finish and clear the progress
    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl Drop for ApiProgress {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

pub mod messages {
    use crate::api::Endpoint;

    pub fn querying(endpoint: Endpoint) -> String {
        format!("Fetching {}...", endpoint.display_name().to_lowercase())
    }

    pub fn query_complete(shown: usize, total: u64) -> String {
        format!("{} of {} scores", shown, total)
    }
}
