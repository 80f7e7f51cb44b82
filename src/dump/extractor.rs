//! Streaming bzip2 decompression of downloaded segments.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use bzip2::bufread::MultiBzDecoder;
use log::info;

use super::segment::extracted_path;
use crate::error::{Result, WikiRaiderError};
use crate::progress::ByteProgress;

/// Default size of a single compressed input block.
pub const DEFAULT_BLOCK_SIZE: usize = 100 * 1024;

/// Decompresses a local archive into a sibling plaintext file.
///
/// Input is consumed in fixed-size blocks and output is written as it is
/// produced, so the archive is never held in memory. Concatenated bzip2
/// streams (multistream dumps) are decoded back to back.
pub struct ArchiveExtractor {
    block_size: usize,
    show_progress: bool,
}

impl ArchiveExtractor {
    /// Create an extractor with the default block size and progress bars on.
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            show_progress: true,
        }
    }

    /// Set the compressed input block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Enable or disable the progress bar.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Decompress `archive` and return the path of the plaintext file.
    ///
    /// `compressed_size` only scales the progress bar.
    pub fn extract(&self, archive: &Path, compressed_size: u64) -> Result<PathBuf> {
        let target = extracted_path(archive);
        let name = archive
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Extracting {name}");

        let mut progress = ByteProgress::new(compressed_size, name.clone(), self.show_progress);
        let input = ProgressReader {
            inner: File::open(archive)?,
            progress: &mut progress,
        };
        let mut decoder = MultiBzDecoder::new(BufReader::with_capacity(self.block_size, input));
        let mut output = BufWriter::new(File::create(&target)?);
        let mut block = vec![0u8; self.block_size];

        loop {
            let read = match decoder.read(&mut block) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(WikiRaiderError::extraction(format!("{name}: {e}")));
                }
            };
            output.write_all(&block[..read])?;
        }
        output.flush()?;
        drop(decoder);
        progress.finish();

        info!("Extraction finished: {}", target.display());
        Ok(target)
    }
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Reports every compressed byte pulled from the archive.
struct ProgressReader<'a, R> {
    inner: R,
    progress: &'a mut ByteProgress,
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.progress.inc(read as u64);
        Ok(read)
    }
}
