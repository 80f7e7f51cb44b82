//! Resolves the archive segments that make up a wiki's articles dump.

use std::collections::HashMap;
use std::path::{Component, Path};
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::client::DumpClient;
use super::segment::SegmentDescriptor;
use crate::error::{Result, WikiRaiderError};

/// The job holding the page-articles XML segments.
pub const ARTICLES_JOB: &str = "articlesdump";

/// Name of the job status document below a dump URL.
pub const STATUS_DOCUMENT: &str = "dumpstatus.json";

lazy_static! {
    static ref SEGMENT_KEY: Regex = Regex::new(r"^.*\.xml.*\.bz2$").expect("valid segment pattern");
}

#[derive(Debug, Deserialize)]
struct DumpStatus {
    jobs: HashMap<String, JobStatus>,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    /// Kept as a JSON map so files come out in document order.
    #[serde(default)]
    files: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct FileStatus {
    size: Option<u64>,
}

/// Whether a file key names an XML archive segment.
pub fn is_segment_key(key: &str) -> bool {
    SEGMENT_KEY.is_match(key)
}

/// Whether `key` is a bare file name that stays inside the cache directory.
fn is_plain_file_name(key: &str) -> bool {
    let mut components = Path::new(key).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Turn a job status document into segment descriptors.
///
/// Segments are returned in the order the document lists them. A segment
/// key that is not a bare file name is rejected.
pub fn parse_status(base_url: &str, document: &str) -> Result<Vec<SegmentDescriptor>> {
    let status: DumpStatus = serde_json::from_str(document)?;
    let job = status.jobs.get(ARTICLES_JOB).ok_or_else(|| {
        WikiRaiderError::resolution(format!(
            "Could not find `{ARTICLES_JOB}` in {base_url}/{STATUS_DOCUMENT}"
        ))
    })?;

    let mut segments = Vec::new();
    for (key, file) in &job.files {
        debug!("Investigating file {key}");
        if !is_segment_key(key) {
            continue;
        }
        if !is_plain_file_name(key) {
            return Err(WikiRaiderError::resolution(format!(
                "File {key} is not a plain file name"
            )));
        }
        let file = FileStatus::deserialize(file)
            .map_err(|e| WikiRaiderError::resolution(format!("File {key}: {e}")))?;
        let size = file
            .size
            .ok_or_else(|| WikiRaiderError::resolution(format!("File {key} has no size")))?;
        info!("Identified XML file {key}");
        segments.push(SegmentDescriptor::new(base_url, key.as_str(), size));
    }

    Ok(segments)
}

/// Queries `<base>/dumpstatus.json` for the segments to ingest.
pub struct ArchiveResolver {
    client: Arc<dyn DumpClient>,
}

impl ArchiveResolver {
    /// Create a resolver using `client` for the status request.
    pub fn new(client: Arc<dyn DumpClient>) -> Self {
        Self { client }
    }

    /// Resolve every XML segment of the articles dump at `base_url`.
    pub fn resolve(&self, base_url: &str) -> Result<Vec<SegmentDescriptor>> {
        let base_url = base_url.trim_end_matches('/');
        let status_url = format!("{base_url}/{STATUS_DOCUMENT}");
        let document = self.client.get_text(&status_url).map_err(|e| {
            WikiRaiderError::resolution(format!("Could not fetch {status_url}: {e}"))
        })?;

        parse_status(base_url, &document)
    }
}
