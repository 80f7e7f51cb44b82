//! End-to-end wordlist generation for one wiki database.

pub mod config;
pub mod driver;

pub use config::{DEFAULT_CDN_URL, PipelineConfig};
pub use driver::{PipelineDriver, RunSummary, SAMPLE_SIZE};
