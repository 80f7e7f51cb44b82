//! Tokenizer implementations for text analysis.
//!
//! - [`regex::RegexTokenizer`] - Extracts regex matches (or the gaps between them)
//! - [`word::WordTokenizer`] - Wiki markup aware word extraction used by the pipeline

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a single tokenizer can be shared by
/// every consumer thread.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod word;

pub use regex::RegexTokenizer;
pub use word::{WordTokenizer, tokenize};
