//! Upload progress rendering with TTY detection.
//!
//! The publisher owns the completed-count and publishes it over a watch
//! channel; this module only renders it, as a spinner when stderr is a TTY
//! and as plain log lines otherwise.

use atty::Stream;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;

use crate::publisher::UploadProgress;

/// Detects whether stderr is connected to a TTY.
pub fn is_tty() -> bool {
    atty::is(Stream::Stderr)
}

/// Spinner labelled `Uploading artifacts {completed}/{total}`.
pub struct UploadSpinner {
    bar: Option<ProgressBar>,
}

impl UploadSpinner {
    pub fn new() -> Self {
        let bar = if is_tty() {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        Self { bar }
    }

    /// Render updates until the publisher drops its sender half.
    pub async fn run(self, mut rx: watch::Receiver<UploadProgress>) {
        self.update(*rx.borrow_and_update());
        while rx.changed().await.is_ok() {
            let progress = *rx.borrow_and_update();
            self.update(progress);
        }
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    fn update(&self, progress: UploadProgress) {
        if progress.total == 0 {
            return;
        }
        let label = format!(
            "Uploading artifacts {}/{}",
            progress.completed, progress.total
        );
        match &self.bar {
            Some(bar) => bar.set_message(label),
            None => tracing::info!("{}", label),
        }
    }
}

impl Default for UploadSpinner {
    fn default() -> Self {
        Self::new()
    }
}
