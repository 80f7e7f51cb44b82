//! Word extraction for wiki titles and wikitext bodies.
//!
//! Text is first split on a fixed delimiter class (whitespace, punctuation,
//! markup symbols and escaped sequences such as a literal `\n`), then every
//! maximal run of Latin letters (including the Latin-1 accented range) is
//! emitted as a word. Digits and symbols never end up in a word and case is
//! preserved.

use ahash::AHashSet;
use lazy_static::lazy_static;

use super::Tokenizer;
use super::regex::RegexTokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Characters that never belong to a word.
pub const DELIMITER_PATTERN: &str = r#"\\\w|[\s,.:!@#$%^&*()_=\-`~\[\]{};"'/?><|]"#;

/// A word is a run of basic Latin letters or accented Latin-1 letters up to `ú`.
pub const WORD_PATTERN: &str = r"[A-Za-zÀ-ÖØ-öø-ú]+";

lazy_static! {
    static ref DEFAULT_TOKENIZER: WordTokenizer = WordTokenizer::default();
}

/// Tokenize `text` with the default [`WordTokenizer`] into a set of words.
///
/// ```
/// use wikiraider::analysis::tokenizer::tokenize;
///
/// let words = tokenize("Café-Society, 2021!");
/// assert_eq!(words.len(), 2);
/// assert!(words.contains("Café"));
/// assert!(words.contains("Society"));
/// ```
pub fn tokenize(text: &str) -> AHashSet<String> {
    DEFAULT_TOKENIZER.words(text)
}

/// Splits on delimiters, then extracts letter runs from what is left.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    delimiters: RegexTokenizer,
    letters: RegexTokenizer,
}

impl WordTokenizer {
    /// Create a word tokenizer with the default delimiter and letter classes.
    pub fn new() -> Result<Self> {
        Self::with_patterns(DELIMITER_PATTERN, WORD_PATTERN)
    }

    /// Create a word tokenizer with custom delimiter and word patterns.
    pub fn with_patterns(delimiters: &str, word: &str) -> Result<Self> {
        Ok(WordTokenizer {
            delimiters: RegexTokenizer::with_gaps(delimiters)?,
            letters: RegexTokenizer::with_pattern(word)?,
        })
    }

    /// Unique words found in `text`.
    pub fn words(&self, text: &str) -> AHashSet<String> {
        let mut words = AHashSet::new();
        for_each_word(self, text, |word, _, _| {
            if !words.contains(word) {
                words.insert(word.to_string());
            }
        });
        words
    }
}

fn for_each_word<F>(tokenizer: &WordTokenizer, text: &str, mut f: F)
where
    F: FnMut(&str, usize, usize),
{
    for gap in tokenizer.delimiters.spans(text) {
        let piece = &text[gap.clone()];
        for word in tokenizer.letters.spans(piece) {
            f(
                &piece[word.clone()],
                gap.start + word.start,
                gap.start + word.end,
            );
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new().expect("Default word patterns should be valid")
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        for_each_word(self, text, |word, start, end| {
            let position = tokens.len();
            tokens.push(Token::with_offsets(word, position, start, end));
        });
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: AHashSet<String>) -> Vec<String> {
        let mut words: Vec<String> = words.into_iter().collect();
        words.sort();
        words
    }

    #[test]
    fn test_punctuation_and_digits_are_dropped() {
        assert_eq!(sorted(tokenize("Café-Society, 2021!")), vec!["Café", "Society"]);
        assert_eq!(sorted(tokenize("Cat_2")), vec!["Cat"]);
        assert!(tokenize("1234 56.78 !!! ???").is_empty());
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(sorted(tokenize("The dog runs.")), vec!["The", "dog", "runs"]);
        assert_eq!(sorted(tokenize("Dog dog DOG")), vec!["DOG", "Dog", "dog"]);
    }

    #[test]
    fn test_wiki_markup_is_discarded() {
        let text = "{{Infobox|name=Amsterdam}} '''Amsterdam''' is the [[capital]] of the <ref>[[Netherlands]]</ref>";
        let words = sorted(tokenize(text));
        assert_eq!(
            words,
            vec!["Amsterdam", "Infobox", "Netherlands", "capital", "is", "name", "of", "ref", "the"]
        );
    }

    #[test]
    fn test_escaped_sequences_are_delimiters() {
        // A literal backslash-n must not glue an `n` onto the next word.
        let words = sorted(tokenize(r"foo\nbar"));
        assert_eq!(words, vec!["bar", "foo"]);
    }

    #[test]
    fn test_accented_range() {
        let words = sorted(tokenize("Ærø crème déjà naïve 3×4 ÷"));
        assert_eq!(words, vec!["crème", "déjà", "naïve", "Ærø"]);
        // Outside the supported range the word is split.
        assert_eq!(sorted(tokenize("Łódź")), vec!["ód"]);
        assert_eq!(sorted(tokenize("brûlée")), vec!["br", "lée"]);
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let text = "Über-Café {{cite|year=1999}} Señor's niño; résumé!";
        let first = tokenize(text);
        let joined = first.iter().cloned().collect::<Vec<_>>().join(" ");
        assert_eq!(tokenize(&joined), first);
    }

    #[test]
    fn test_token_offsets() {
        let tokenizer = WordTokenizer::default();
        let text = "Dog, cat";
        let tokens: Vec<Token> = tokenizer.tokenize(text).unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "cat");
        assert_eq!(tokens[1].position, 1);
        assert_eq!(&text[tokens[1].start_offset..tokens[1].end_offset], "cat");
        assert_eq!(tokenizer.name(), "word");
    }
}
