//! HTTP access to the dump mirror.

use std::io::Read;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::error::Result;

/// Network seam used by the resolver, fetcher and dump listing.
///
/// Implementations must treat a non-success status as an error.
pub trait DumpClient: Send + Sync {
    /// Fetch a whole (small) document as text.
    fn get_text(&self, url: &str) -> Result<String>;

    /// Open a streaming body for a (large) document.
    fn get_stream(&self, url: &str) -> Result<Box<dyn Read + Send>>;
}

/// [`DumpClient`] backed by a blocking `reqwest` client.
///
/// Requests have no overall timeout: segments are hundreds of megabytes and
/// a run is only ever stopped by terminating the process.
#[derive(Debug, Clone)]
pub struct HttpDumpClient {
    client: Client,
}

impl HttpDumpClient {
    /// Create a client with the crate user agent.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("wikiraider/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self { client })
    }
}

impl DumpClient for HttpDumpClient {
    fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    fn get_stream(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        debug!("GET {url} (streaming)");
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(Box::new(response))
    }
}
