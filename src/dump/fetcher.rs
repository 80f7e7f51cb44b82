//! Cached, chunked download of dump segments.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use super::client::DumpClient;
use super::segment::SegmentDescriptor;
use crate::error::{Result, WikiRaiderError};
use crate::progress::ByteProgress;

/// Default size of a single body read.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// What [`ArchiveFetcher::fetch`] did for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A file of the announced size was already on disk; nothing was read
    /// from the network.
    Cached,

    /// The segment was streamed to disk.
    Downloaded {
        /// Bytes written.
        bytes: u64,
    },
}

/// Whether `path` holds a file of exactly `size` bytes.
///
/// This is a size heuristic, not a checksum: a truncated file that happens
/// to match, or a remote file that changed without changing size, is not
/// detected.
pub fn is_cached(path: &Path, size: u64) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() == size)
        .unwrap_or(false)
}

/// Downloads segments to local storage, skipping ones already cached.
///
/// There is no retry: any transport failure is returned as a
/// [`WikiRaiderError::Download`] and the partial file is left on disk.
pub struct ArchiveFetcher {
    client: Arc<dyn DumpClient>,
    chunk_size: usize,
    show_progress: bool,
}

impl ArchiveFetcher {
    /// Create a fetcher with the default chunk size and progress bars on.
    pub fn new(client: Arc<dyn DumpClient>) -> Self {
        Self {
            client,
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: true,
        }
    }

    /// Set the size of a single body read.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Enable or disable the progress bar.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Make sure `segment` is available at `destination`.
    pub fn fetch(&self, segment: &SegmentDescriptor, destination: &Path) -> Result<FetchOutcome> {
        if is_cached(destination, segment.size) {
            info!("Using cached archive on disk: {}", segment.key);
            return Ok(FetchOutcome::Cached);
        }

        info!("Downloading {}", segment.url);
        let mut body = self
            .client
            .get_stream(&segment.url)
            .map_err(|e| WikiRaiderError::download(format!("{}: {e}", segment.url)))?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(destination)?;
        let mut progress = ByteProgress::new(segment.size, segment.key.clone(), self.show_progress);
        let mut chunk = vec![0u8; self.chunk_size];

        loop {
            let read = match body.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(WikiRaiderError::download(format!("{}: {e}", segment.url)));
                }
            };
            file.write_all(&chunk[..read])?;
            progress.inc(read as u64);
        }
        file.flush()?;
        progress.finish();

        let bytes = progress.position();
        if bytes != segment.size {
            warn!(
                "Downloaded {bytes} bytes for {} but the mirror announced {}",
                segment.key, segment.size
            );
        }
        info!("Download finished: {}", segment.key);

        Ok(FetchOutcome::Downloaded { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct CountingClient {
        body: Vec<u8>,
        streams: AtomicUsize,
    }

    impl DumpClient for CountingClient {
        fn get_text(&self, _url: &str) -> Result<String> {
            Err(WikiRaiderError::other("not used"))
        }

        fn get_stream(&self, _url: &str) -> Result<Box<dyn Read + Send>> {
            self.streams.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(Cursor::new(self.body.clone())))
        }
    }

    struct FailingClient;

    impl DumpClient for FailingClient {
        fn get_text(&self, _url: &str) -> Result<String> {
            Err(WikiRaiderError::other("404 Not Found"))
        }

        fn get_stream(&self, _url: &str) -> Result<Box<dyn Read + Send>> {
            Err(WikiRaiderError::other("404 Not Found"))
        }
    }

    #[test]
    fn test_second_fetch_is_a_cache_hit() {
        let temp_dir = TempDir::new().unwrap();
        let body: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let client = Arc::new(CountingClient {
            body: body.clone(),
            streams: AtomicUsize::new(0),
        });
        let fetcher = ArchiveFetcher::new(client.clone()).with_progress(false);
        let segment = SegmentDescriptor::new("http://mirror/x", "x.xml.bz2", body.len() as u64);
        let destination = segment.archive_path(temp_dir.path());

        let first = fetcher.fetch(&segment, &destination).unwrap();
        assert_eq!(first, FetchOutcome::Downloaded { bytes: 20_000 });
        assert_eq!(fs::read(&destination).unwrap(), body);

        let second = fetcher.fetch(&segment, &destination).unwrap();
        assert_eq!(second, FetchOutcome::Cached);
        assert_eq!(client.streams.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_size_mismatch_downloads_again() {
        let temp_dir = TempDir::new().unwrap();
        let client = Arc::new(CountingClient {
            body: b"complete".to_vec(),
            streams: AtomicUsize::new(0),
        });
        let fetcher = ArchiveFetcher::new(client.clone())
            .with_chunk_size(3)
            .with_progress(false);
        let segment = SegmentDescriptor::new("http://mirror/x", "x.xml.bz2", 8);
        let destination = segment.archive_path(temp_dir.path());
        fs::write(&destination, b"part").unwrap();

        let outcome = fetcher.fetch(&segment, &destination).unwrap();
        assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 8 });
        assert_eq!(fs::read(&destination).unwrap(), b"complete");
        assert_eq!(client.streams.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_status_is_a_download_error() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = ArchiveFetcher::new(Arc::new(FailingClient)).with_progress(false);
        let segment = SegmentDescriptor::new("http://mirror/x", "x.xml.bz2", 8);

        let result = fetcher.fetch(&segment, &segment.archive_path(temp_dir.path()));
        assert!(matches!(result, Err(WikiRaiderError::Download(_))));
    }
}
