use std::cell::RefCell;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use smm_usage_core::ProgressReporter;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// CLI progress reporter using indicatif spinners.
///
/// - Media fetch: spinner, then a summary line
/// - Generation fetches: one spinner updated per media item
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_media_fetch_start(&self, user_id: &str) {
        self.set_bar(spinner(format!("Fetching media for {}...", user_id)));
    }

    fn on_media_fetch_complete(&self, media_count: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!("{}", media_summary(media_count, duration_secs));
    }

    fn on_generations_fetch_start(&self, index: usize, total: usize) {
        let message = format!("Fetching generations {}/{}...", index, total);
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(message);
            return;
        }
        self.set_bar(spinner(message));
    }
}

fn media_summary(media_count: usize, duration_secs: f64) -> String {
    format!(
        "  {} {} media items in {:.2}s",
        "✓".green(),
        media_count,
        duration_secs
    )
}

impl Drop for CliReporter {
    fn drop(&mut self) {
        self.finish_bar();
    }
}
