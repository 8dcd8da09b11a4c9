//! Progress spinner utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner with the given message
///
/// Returns `None` in batch mode.
pub fn create_spinner(message: &str, batch: bool) -> Option<ProgressBar> {
    if batch {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// Finish spinner with a message, or clear it when the message is empty
pub fn finish_spinner(spinner: Option<ProgressBar>, message: &str) {
    match spinner {
        Some(s) if message.is_empty() => s.finish_and_clear(),
        Some(s) => s.finish_with_message(message.to_string()),
        None => {}
    }
}
