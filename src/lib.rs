//! # WikiRaider
//!
//! Builds wordlists from Wikipedia database dumps.
//!
//! ## Pipeline
//!
//! - Resolve the article segments of a dump from its `dumpstatus.json`
//! - Download each bzip2 segment, reusing complete cached copies
//! - Decompress it and stream its pages without loading the document
//! - Tokenize every page on a pool of consumer threads
//! - Write the deduplicated words to `<wiki>/<wiki>-YYYY-MM-DD.txt`

pub mod analysis;
pub mod cli;
pub mod dump;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod progress;
pub mod queue;
pub mod writer;

pub mod prelude {
    pub use crate::dump::{DumpClient, HttpDumpClient};
    pub use crate::error::{Result, WikiRaiderError};
    pub use crate::pipeline::{PipelineConfig, PipelineDriver, RunSummary};
    pub use crate::queue::{WordSet, WorkQueue};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
