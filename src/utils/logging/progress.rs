//! Progress reporting for row streams of unknown length
//!
//! Source files are read lazily, so the row count is never known up front;
//! spinners with a running position are used instead of bars.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Style for a row-counting spinner
pub const DEFAULT_SPINNER_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {pos} rows ({per_sec}) {msg}";

/// Create a spinner progress bar for operations without a known length
///
/// # Arguments
/// * `message` - Optional message to display with the spinner
///
/// # Returns
/// A configured spinner `ProgressBar`
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(DEFAULT_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }

    // Set reasonable tick rate
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// A spinner that draws nothing, for library callers and tests
#[must_use]
pub fn hidden_spinner() -> ProgressBar {
    ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
}

/// Finish a progress bar with a completion message
///
/// # Arguments
/// * `pb` - The `ProgressBar` to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
