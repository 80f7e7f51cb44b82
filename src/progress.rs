//! Byte-granular progress bars for downloads and extraction.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress tracker scaled to a known byte total.
///
/// When disabled no bar is drawn, but the position is still tracked so
/// callers can report how many bytes went through.
pub struct ByteProgress {
    /// Progress bar (None if running in quiet mode)
    progress_bar: Option<ProgressBar>,
    position: u64,
}

impl ByteProgress {
    /// Create a new progress tracker for `total` bytes.
    pub fn new(total: u64, message: impl Into<String>, enabled: bool) -> Self {
        let progress_bar = if enabled {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb.set_message(message.into());
            Some(pb)
        } else {
            None
        };

        Self {
            progress_bar,
            position: 0,
        }
    }

    /// A tracker that never draws.
    pub fn hidden() -> Self {
        Self::new(0, "", false)
    }

    /// Advance by `bytes`.
    pub fn inc(&mut self, bytes: u64) {
        self.position += bytes;
        if let Some(ref pb) = self.progress_bar {
            pb.inc(bytes);
        }
    }

    /// Bytes reported so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Finish the bar and leave it on screen.
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish();
        }
    }
}
