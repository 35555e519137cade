/// Trait for reporting lookup progress.
///
/// The CLI implements it with indicatif spinners. All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_media_fetch_start(&self, _user_id: &str) {}
    fn on_media_fetch_complete(&self, _media_count: usize, _duration_secs: f64) {}
    fn on_generations_fetch_start(&self, _index: usize, _total: usize) {}
    fn on_generations_fetch_complete(&self, _generation_count: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
