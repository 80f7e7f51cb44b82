//! Page records extracted from the export XML.

use serde::{Deserialize, Serialize};

/// Title and first-revision text of one `<page>`.
///
/// Created once by the reader, consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page title, e.g. `Amsterdam`.
    pub title: String,

    /// Raw wikitext of the first revision.
    pub text: String,
}

impl PageRecord {
    /// Create a new page record.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Page being assembled from XML events.
#[derive(Debug, Default)]
pub(crate) struct PartialPage {
    pub(crate) title: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) revisions: usize,
    pub(crate) in_revision: bool,
}

impl PartialPage {
    /// A record, if both title and text carried character data.
    pub(crate) fn into_record(self) -> Option<PageRecord> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let text = self.text.filter(|t| !t.is_empty())?;
        Some(PageRecord { title, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_page_requires_both_fields() {
        let complete = PartialPage {
            title: Some("Dog".to_string()),
            text: Some("The dog runs.".to_string()),
            ..Default::default()
        };
        assert_eq!(
            complete.into_record(),
            Some(PageRecord::new("Dog", "The dog runs."))
        );

        let no_text = PartialPage {
            title: Some("Dog".to_string()),
            ..Default::default()
        };
        assert_eq!(no_text.into_record(), None);

        let empty_title = PartialPage {
            title: Some(String::new()),
            text: Some("body".to_string()),
            ..Default::default()
        };
        assert_eq!(empty_title.into_record(), None);
    }
}
