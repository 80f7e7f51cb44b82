//! Page consumer: tokenizes a page and merges its words into the shared set.

use std::sync::Arc;

use ahash::AHashSet;
use log::trace;

use super::accumulator::WordSet;
use super::work_queue::ItemProcessor;
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::error::{Result, WikiRaiderError};
use crate::page::PageRecord;

/// Turns each [`PageRecord`] into words.
///
/// Title and text are tokenized first; the union is then inserted into the
/// shared set in one step, so a page that fails contributes nothing.
#[derive(Clone)]
pub struct PageConsumer {
    tokenizer: Arc<dyn Tokenizer>,
    words: WordSet,
}

impl PageConsumer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, words: WordSet) -> Self {
        Self { tokenizer, words }
    }

    /// Consumer using the default [`WordTokenizer`].
    pub fn with_default_tokenizer(words: WordSet) -> Self {
        Self::new(Arc::new(WordTokenizer::default()), words)
    }

    /// The set this consumer writes into.
    pub fn words(&self) -> &WordSet {
        &self.words
    }

    fn page_words(&self, page: &PageRecord) -> Result<AHashSet<String>> {
        let mut words = AHashSet::new();
        for field in [&page.title, &page.text] {
            let tokens = self.tokenizer.tokenize(field).map_err(|e| {
                WikiRaiderError::page_processing(format!("page '{}': {e}", page.title))
            })?;
            words.extend(tokens.map(|token| token.text));
        }
        Ok(words)
    }
}

impl ItemProcessor<PageRecord> for PageConsumer {
    fn process(&self, page: PageRecord) -> Result<()> {
        let words = self.page_words(&page)?;
        let found = words.len();
        let added = self.words.insert_all(words);
        trace!("Page '{}': {found} words, {added} new", page.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenStream;

    struct BrokenTokenizer;

    impl Tokenizer for BrokenTokenizer {
        fn tokenize(&self, _text: &str) -> Result<TokenStream> {
            Err(WikiRaiderError::other("tokenizer failure"))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_title_and_text_are_merged() {
        let words = WordSet::new();
        let consumer = PageConsumer::with_default_tokenizer(words.clone());

        consumer.process(PageRecord::new("Dog", "The dog runs.")).unwrap();
        consumer.process(PageRecord::new("Cat_2", "Cats sleep.")).unwrap();

        assert_eq!(
            words.to_sorted_vec(),
            vec!["Cat", "Cats", "Dog", "The", "dog", "runs", "sleep"]
        );
    }

    #[test]
    fn test_failed_page_adds_nothing() {
        let words = WordSet::new();
        words.insert("existing".to_string());
        let consumer = PageConsumer::new(Arc::new(BrokenTokenizer), words.clone());

        let result = consumer.process(PageRecord::new("Dog", "The dog runs."));
        assert!(matches!(result, Err(WikiRaiderError::PageProcessing(_))));
        assert_eq!(words.to_sorted_vec(), vec!["existing"]);
    }
}
