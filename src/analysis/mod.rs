//! Text analysis: turning page titles and bodies into words.

pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use token::*;
pub use tokenizer::*;
