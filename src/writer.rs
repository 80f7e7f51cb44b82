//! Writing the final wordlist to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::info;

use crate::error::{Result, WikiRaiderError};

/// Derive the wiki name (e.g. `nlwiki`) from a dump URL.
///
/// ```
/// use wikiraider::writer::wiki_name;
///
/// let name = wiki_name("https://dumps.wikimedia.org/nlwiki/20200301").unwrap();
/// assert_eq!(name, "nlwiki");
/// ```
pub fn wiki_name(url: &str) -> Result<String> {
    let path = match url.rfind(".org") {
        Some(index) => &url[index + ".org".len()..],
        None => {
            let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
            without_scheme
                .split_once('/')
                .map_or("", |(_, path)| path)
        }
    };

    path.trim_matches('/')
        .split('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| WikiRaiderError::invalid_argument(format!("no wiki name in URL '{url}'")))
}

/// Writes one newline-separated wordlist per wiki and day.
#[derive(Debug, Clone)]
pub struct WordlistWriter {
    root: PathBuf,
}

impl WordlistWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every wordlist of `wiki`.
    pub fn directory(&self, wiki: &str) -> PathBuf {
        self.root.join(wiki)
    }

    /// `<root>/<wiki>/<wiki>-YYYY-MM-DD.txt`
    pub fn file_path(&self, wiki: &str, date: NaiveDate) -> PathBuf {
        self.directory(wiki)
            .join(format!("{wiki}-{}.txt", date.format("%Y-%m-%d")))
    }

    /// Write `words` for today, replacing any earlier list of the same day.
    pub fn write(&self, wiki: &str, words: &[String]) -> Result<PathBuf> {
        self.write_dated(wiki, Local::now().date_naive(), words)
    }

    /// Write `words` for `date`. The words are written in the given order.
    pub fn write_dated(&self, wiki: &str, date: NaiveDate, words: &[String]) -> Result<PathBuf> {
        fs::create_dir_all(self.directory(wiki))?;

        let path = self.file_path(wiki, date);
        fs::write(&path, words.join("\n"))?;
        info!("Wrote {} words to {}", words.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_wiki_name() {
        assert_eq!(
            wiki_name("https://dumps.wikimedia.org/nlwiki/20200301").unwrap(),
            "nlwiki"
        );
        assert_eq!(
            wiki_name("https://dumps.wikimedia.org/enwiki/latest/").unwrap(),
            "enwiki"
        );
        assert_eq!(wiki_name("https://dumps.wikimedia.org/fywiki").unwrap(), "fywiki");
        assert_eq!(wiki_name("http://localhost:8080/nlwiki/20200301").unwrap(), "nlwiki");
        assert!(wiki_name("https://dumps.wikimedia.org/").is_err());
        assert!(wiki_name("localhost").is_err());
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = WordlistWriter::new(temp_dir.path());
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();

        let words = vec!["Cat".to_string(), "dog".to_string()];
        let path = writer.write_dated("nlwiki", date, &words).unwrap();
        assert_eq!(path, temp_dir.path().join("nlwiki").join("nlwiki-2020-03-01.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Cat\ndog");

        let path = writer
            .write_dated("nlwiki", date, &["only".to_string()])
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "only");
    }
}
