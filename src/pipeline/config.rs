//! Configuration for a wordlist run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dump::extractor::DEFAULT_BLOCK_SIZE;
use crate::dump::fetcher::DEFAULT_CHUNK_SIZE;
use crate::error::Result;
use crate::queue::{DEFAULT_CONSUMER_AMOUNT, QueueConfig};

/// Default dump mirror.
pub const DEFAULT_CDN_URL: &str = "https://dumps.wikimedia.org";

/// Settings for one [`PipelineDriver`](super::PipelineDriver) run.
///
/// Every field has a default, so a configuration file only needs the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Mirror used for listing dumps.
    pub cdn_url: String,

    /// Where archives are cached and extracted.
    pub tmp_dir: PathBuf,

    /// Root directory of the written wordlists.
    pub output_dir: PathBuf,

    /// Number of page consumers.
    pub consumer_amount: usize,

    /// Bytes per read while downloading.
    pub download_chunk_size: usize,

    /// Bytes of compressed input per decompression block.
    pub extract_block_size: usize,

    /// How long an empty consumer waits before reporting itself idle.
    pub idle_timeout: Duration,

    /// Draw progress bars for downloads and extraction.
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cdn_url: DEFAULT_CDN_URL.to_string(),
            tmp_dir: PathBuf::from("./.tmp"),
            output_dir: PathBuf::from("./wordlists"),
            consumer_amount: DEFAULT_CONSUMER_AMOUNT,
            download_chunk_size: DEFAULT_CHUNK_SIZE,
            extract_block_size: DEFAULT_BLOCK_SIZE,
            idle_timeout: Duration::from_secs(1),
            show_progress: true,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_cdn_url(mut self, cdn_url: impl Into<String>) -> Self {
        self.cdn_url = cdn_url.into();
        self
    }

    pub fn with_tmp_dir(mut self, tmp_dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = tmp_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_consumer_amount(mut self, consumer_amount: usize) -> Self {
        self.consumer_amount = consumer_amount;
        self
    }

    pub fn with_download_chunk_size(mut self, chunk_size: usize) -> Self {
        self.download_chunk_size = chunk_size;
        self
    }

    pub fn with_extract_block_size(mut self, block_size: usize) -> Self {
        self.extract_block_size = block_size;
        self
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Consumer pool settings for the work queue.
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig::new(self.consumer_amount).with_idle_timeout(self.idle_timeout)
    }
}
