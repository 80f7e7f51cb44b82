//! Forward-only page reader over MediaWiki export XML.
//!
//! The document is walked once with an event parser. Only the title and
//! text of the page currently being read are kept, so memory use is bounded
//! by the largest page rather than by the size of the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::record::{PageRecord, PartialPage};
use crate::error::{Result, WikiRaiderError};

/// Namespace of the export schema the reader is written against. Elements
/// are matched by local name, so prefixed or re-declared namespaces work too.
pub const EXPORT_NAMESPACE: &str = "http://www.mediawiki.org/xml/export-0.10/";

const READ_BUFFER: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Text,
}

/// Lazily yields one [`PageRecord`] per `<page>` in document order.
///
/// Pages without a title or without first-revision text are skipped
/// silently. A parse error is yielded once and ends the stream.
pub struct PageStreamReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
    pages_seen: u64,
    pages_dropped: u64,
}

impl PageStreamReader<BufReader<File>> {
    /// Open an extracted export file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::with_capacity(READ_BUFFER, file)))
    }
}

impl<R: BufRead> PageStreamReader<R> {
    /// Read pages from any buffered source.
    pub fn from_reader(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::with_capacity(8192),
            done: false,
            pages_seen: 0,
            pages_dropped: 0,
        }
    }

    /// Number of `<page>` elements closed so far, including dropped ones.
    pub fn pages_seen(&self) -> u64 {
        self.pages_seen
    }

    /// Number of pages skipped for lacking a title or text.
    pub fn pages_dropped(&self) -> u64 {
        self.pages_dropped
    }

    fn next_record(&mut self) -> Result<Option<PageRecord>> {
        let mut page: Option<PartialPage> = None;
        let mut capture: Option<Field> = None;
        let mut value = String::new();

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    return Err(WikiRaiderError::parse(format!(
                        "at byte {}: {e}",
                        self.reader.buffer_position()
                    )));
                }
            };

            match event {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"page" => {
                        page = Some(PartialPage::default());
                        capture = None;
                    }
                    b"revision" => {
                        if let Some(ref mut page) = page {
                            page.revisions += 1;
                            page.in_revision = true;
                        }
                    }
                    b"title" => {
                        if let Some(ref page) = page {
                            if !page.in_revision && page.title.is_none() {
                                capture = Some(Field::Title);
                                value.clear();
                            }
                        }
                    }
                    b"text" => {
                        if let Some(ref page) = page {
                            if page.in_revision && page.revisions == 1 && page.text.is_none() {
                                capture = Some(Field::Text);
                                value.clear();
                            }
                        }
                    }
                    _ => {}
                },
                Event::Text(ref e) => {
                    if capture.is_some() {
                        value.push_str(&decode_text(e));
                    }
                }
                Event::CData(ref e) => {
                    if capture.is_some() {
                        value.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"title" | b"text" => {
                        if let (Some(field), Some(page)) = (capture.take(), page.as_mut()) {
                            let text = std::mem::take(&mut value);
                            match field {
                                Field::Title => page.title = Some(text),
                                Field::Text => page.text = Some(text),
                            }
                        }
                    }
                    b"revision" => {
                        if let Some(ref mut page) = page {
                            page.in_revision = false;
                        }
                    }
                    b"page" => {
                        if let Some(finished) = page.take() {
                            self.pages_seen += 1;
                            match finished.into_record() {
                                Some(record) => return Ok(Some(record)),
                                None => {
                                    self.pages_dropped += 1;
                                    debug!("Skipping page #{} without title or text", self.pages_seen);
                                }
                            }
                        }
                    }
                    _ => {}
                },
                Event::Eof => {
                    if page.is_some() {
                        return Err(WikiRaiderError::parse(
                            "unexpected end of document inside <page>",
                        ));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for PageStreamReader<R> {
    type Item = Result<PageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Character data with invalid UTF-8 replaced and entities resolved.
/// Unknown entities are kept verbatim rather than failing the page.
fn decode_text(raw: &[u8]) -> String {
    let lossy = String::from_utf8_lossy(raw);
    match unescape(&lossy) {
        Ok(text) => text.into_owned(),
        Err(_) => lossy.into_owned(),
    }
}
