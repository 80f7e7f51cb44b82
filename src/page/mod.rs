//! Streaming extraction of pages from MediaWiki export XML.

pub mod reader;
pub mod record;

pub use reader::{EXPORT_NAMESPACE, PageStreamReader};
pub use record::PageRecord;
