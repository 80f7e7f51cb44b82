//! Orchestration of one wordlist run.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::config::PipelineConfig;
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::dump::{ArchiveExtractor, ArchiveFetcher, ArchiveResolver, DumpClient, FetchOutcome};
use crate::error::Result;
use crate::page::PageStreamReader;
use crate::queue::{PageConsumer, WordSet, WorkQueue};
use crate::writer::{WordlistWriter, wiki_name};

/// Number of words reported as a sample at the end of a run.
pub const SAMPLE_SIZE: usize = 10;

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub wiki_name: String,
    pub segments: usize,
    pub pages_enqueued: u64,
    pub pages_failed: u64,
    pub word_count: usize,
    pub sample: Vec<String>,
    /// Written wordlist; `None` when no word was found.
    pub output: Option<PathBuf>,
}

/// Runs resolve, fetch, extract, read, consume and write for one wiki.
///
/// Every archive is downloaded and extracted before the first page is
/// queued. Any resolution, download, extraction or parse error aborts the
/// run and nothing is written; a page that fails to process is only logged.
pub struct PipelineDriver {
    config: PipelineConfig,
    client: Arc<dyn DumpClient>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl PipelineDriver {
    pub fn new(config: PipelineConfig, client: Arc<dyn DumpClient>) -> Self {
        Self {
            config,
            client,
            tokenizer: Arc::new(WordTokenizer::default()),
        }
    }

    /// Replace the tokenizer used by the page consumers.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build the wordlist for the dump at `base_url`.
    pub fn run(&self, base_url: &str) -> Result<RunSummary> {
        let wiki = wiki_name(base_url)?;
        let base_url = base_url.trim_end_matches('/');
        fs::create_dir_all(&self.config.tmp_dir)?;

        let segments = ArchiveResolver::new(Arc::clone(&self.client)).resolve(base_url)?;
        info!("Found {} XML file(s) for {wiki}", segments.len());

        let fetcher = ArchiveFetcher::new(Arc::clone(&self.client))
            .with_chunk_size(self.config.download_chunk_size)
            .with_progress(self.config.show_progress);
        let extractor = ArchiveExtractor::new()
            .with_block_size(self.config.extract_block_size)
            .with_progress(self.config.show_progress);

        let mut extracted = Vec::with_capacity(segments.len());
        for segment in &segments {
            let archive = segment.archive_path(&self.config.tmp_dir);
            if let FetchOutcome::Downloaded { bytes } = fetcher.fetch(segment, &archive)? {
                debug!("Downloaded {bytes} bytes of {}", segment.key);
            }
            extracted.push(extractor.extract(&archive, segment.size)?);
        }

        let words = WordSet::new();
        let consumer = Arc::new(PageConsumer::new(Arc::clone(&self.tokenizer), words.clone()));
        let queue = WorkQueue::start(self.config.queue_config(), consumer)?;

        for path in &extracted {
            let mut reader = PageStreamReader::open(path)?;
            let mut pages = 0u64;
            for page in reader.by_ref() {
                queue.enqueue(page?)?;
                pages += 1;
            }
            info!(
                "Finished adding all {pages} pages of file {} ({} without title or text skipped)",
                path.display(),
                reader.pages_dropped()
            );
        }

        queue.signal_draining()?;
        info!("Waiting for {} consumer(s) to finish", queue.consumer_amount());
        queue.await_drain()?;

        let stats = queue.stats();
        let word_count = words.len();
        let sample = words.sample(SAMPLE_SIZE);
        info!("Found {word_count} unique words");
        if word_count >= SAMPLE_SIZE {
            info!("Here are {SAMPLE_SIZE} of them: {}", sample.join(", "));
        }

        let output = if words.is_empty() {
            None
        } else {
            let writer = WordlistWriter::new(&self.config.output_dir);
            Some(writer.write(&wiki, &words.to_sorted_vec())?)
        };

        Ok(RunSummary {
            wiki_name: wiki,
            segments: segments.len(),
            pages_enqueued: stats.enqueued,
            pages_failed: stats.failed,
            word_count,
            sample,
            output,
        })
    }
}
