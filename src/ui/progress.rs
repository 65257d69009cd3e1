use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Indeterminate progress indicator for walks of unknown size.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(description: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} ({pos} files, {elapsed})").unwrap_or_else(|_| ProgressStyle::default_spinner());

        bar.set_style(style);
        bar.set_message(description.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
