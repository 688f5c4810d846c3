//! Terminal progress display for a single mosaic build

use crate::algorithm::builder::BuildObserver;
use crate::io::configuration::{PROGRESS_BAR_WIDTH, SPINNER_TICK_MS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} rows [{{elapsed_precise}}]"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows a spinner while inputs decode, then a bar advancing per grid row
///
/// Safe to drive from several composition threads at once.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    /// Create a reporter drawing to stderr
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new_spinner())
    }

    /// Create a reporter that tracks progress without drawing anything
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(SPINNER_STYLE.clone());
        bar.set_message("Decoding element images");
        bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        Self { bar }
    }

    /// Rows stamped so far
    pub fn rows_completed(&self) -> u64 {
        self.bar.position()
    }

    /// Total rows expected, once the template has been sampled
    pub fn total_rows(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Clear the display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BuildObserver for ProgressReporter {
    fn elements_loaded(&self, count: usize) {
        self.bar
            .set_message(format!("Loaded {count} elements, sampling template"));
    }

    fn template_sampled(&self, grid_width: usize, grid_height: usize) {
        self.bar.disable_steady_tick();
        self.bar.set_style(ROW_STYLE.clone());
        self.bar.set_length(grid_height as u64);
        self.bar.set_position(0);
        self.bar
            .set_message(format!("Composing {grid_width}x{grid_height} cells"));
    }

    fn row_completed(&self, _y: usize) {
        self.bar.inc(1);
    }
}
