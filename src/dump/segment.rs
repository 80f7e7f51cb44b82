//! Segment descriptors: one downloadable part of a multi-part dump.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Compression suffix of every dump segment.
pub const ARCHIVE_SUFFIX: &str = ".bz2";

/// One archive part of an articles dump.
///
/// `size` is the compressed byte length announced by the mirror. It is the
/// only cache validity check and the scale of the progress bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    /// File name of the segment, e.g. `nlwiki-20200301-pages-articles1.xml-p1p123.bz2`.
    pub key: String,

    /// Compressed size in bytes.
    pub size: u64,

    /// Absolute download URL.
    pub url: String,
}

impl SegmentDescriptor {
    /// Create a descriptor for `key` below `base_url`.
    pub fn new(base_url: &str, key: impl Into<String>, size: u64) -> Self {
        let key = key.into();
        let url = format!("{}/{}", base_url.trim_end_matches('/'), key);
        Self { key, size, url }
    }

    /// Where the compressed segment is cached inside `tmp_dir`.
    pub fn archive_path(&self, tmp_dir: &Path) -> PathBuf {
        tmp_dir.join(&self.key)
    }
}

/// The plaintext sibling of an archive: the same path with `.bz2` removed.
pub fn extracted_path(archive: &Path) -> PathBuf {
    let raw = archive.to_string_lossy();
    match raw.strip_suffix(ARCHIVE_SUFFIX) {
        Some(stripped) => PathBuf::from(stripped),
        None => archive.with_extension("xml"),
    }
}
