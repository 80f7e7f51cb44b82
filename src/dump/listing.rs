//! Listing of the finished dumps published on a mirror.

use lazy_static::lazy_static;
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::client::DumpClient;
use crate::error::{Result, WikiRaiderError};

/// Mirror page listing the latest dump of every wiki.
pub const BACKUP_INDEX: &str = "backup-index.html";

const DUMP_COMPLETE: &str = "Dump complete";

/// Longest link text of a regular language wiki, e.g. `zh_yuewiki`.
const MAX_ALIAS_LEN: usize = 10;

lazy_static! {
    static ref DONE_SPANS: Selector = Selector::parse("span.done").expect("valid selector");
    static ref LINKS: Selector = Selector::parse("a").expect("valid selector");
}

/// A finished dump of one wiki.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpListing {
    /// Language part of the wiki, e.g. `nl`.
    pub name: String,

    /// Database name, e.g. `nlwiki`.
    pub alias: String,

    /// URL of the dump, usable as the `parse` input.
    pub url: String,

    /// Date the dump finished.
    pub date: String,

    /// Time the dump finished.
    pub time: String,
}

/// Scrape `backup-index.html` for completed language-wiki dumps.
///
/// With `search`, only the wiki whose name equals it (case-insensitive) is
/// kept.
pub fn parse_backup_index(cdn_url: &str, html: &str, search: Option<&str>) -> Vec<DumpListing> {
    let cdn_url = cdn_url.trim_end_matches('/');
    let needle = search.map(|s| s.trim().to_lowercase());
    let document = Html::parse_document(html);
    let mut dumps = Vec::new();

    for span in document.select(&DONE_SPANS) {
        let status: String = span.text().collect();
        if status != DUMP_COMPLETE {
            continue;
        }

        let Some(parent) = span.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        // Private dumps are listed without a link.
        let Some(link) = parent.select(&LINKS).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let alias: String = link.text().collect();
        if !alias.ends_with("wiki") || alias.chars().count() > MAX_ALIAS_LEN {
            debug!("Skipping {alias}, not a language wiki");
            continue;
        }
        let name = alias[..alias.len() - "wiki".len()].to_string();

        if let Some(ref needle) = needle {
            if name.trim().to_lowercase() != *needle {
                continue;
            }
        }

        let parent_text: String = parent.text().collect();
        let mut stamp = parent_text.trim().split(' ');
        let date = stamp.next().unwrap_or_default().to_string();
        let time = stamp.next().unwrap_or_default().to_string();

        dumps.push(DumpListing {
            url: format!("{cdn_url}/{href}"),
            alias,
            name,
            date,
            time,
        });
    }

    dumps
}

/// Fetch and scrape the mirror's backup index.
pub fn list_dumps(
    client: &dyn DumpClient,
    cdn_url: &str,
    search: Option<&str>,
) -> Result<Vec<DumpListing>> {
    let index_url = format!("{}/{BACKUP_INDEX}", cdn_url.trim_end_matches('/'));
    match search {
        Some(search) => info!("Listing all Wikipedia dumps matching `{search}`..."),
        None => info!("Listing all Wikipedia dumps..."),
    }

    let html = client
        .get_text(&index_url)
        .map_err(|e| WikiRaiderError::other(format!("Could not fetch {index_url}: {e}")))?;

    Ok(parse_backup_index(cdn_url, &html, search))
}
