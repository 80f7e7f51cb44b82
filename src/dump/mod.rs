//! Remote dump access: resolving, downloading and decompressing segments.

pub mod client;
pub mod extractor;
pub mod fetcher;
pub mod listing;
pub mod resolver;
pub mod segment;

pub use client::{DumpClient, HttpDumpClient};
pub use extractor::ArchiveExtractor;
pub use fetcher::{ArchiveFetcher, FetchOutcome};
pub use listing::{DumpListing, list_dumps};
pub use resolver::ArchiveResolver;
pub use segment::SegmentDescriptor;
