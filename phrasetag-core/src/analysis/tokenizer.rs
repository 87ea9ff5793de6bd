//! Tokenizer trait and the default alphanumeric tokenizer

use crate::types::Token;

/// Splits text into normalized tokens
///
/// Implementations must return tokens in document order with
/// non-overlapping, non-decreasing byte offsets and consecutive positions.
pub trait Tokenizer: Send + Sync {
    /// Tokenize a document
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Tokenizer that emits runs of alphanumeric characters
///
/// Everything else (whitespace, punctuation, symbols) separates tokens.
/// Tokens are lowercased unless configured otherwise.
#[derive(Debug, Clone)]
pub struct StandardTokenizer {
    lowercase: bool,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardTokenizer {
    /// Create a lowercasing tokenizer
    pub fn new() -> Self {
        Self { lowercase: true }
    }

    /// Keep the original casing
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    fn normalize(&self, raw: &str) -> String {
        if self.lowercase {
            raw.to_lowercase()
        } else {
            raw.to_string()
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut run_start: Option<usize> = None;

        for (offset, ch) in text.char_indices() {
            match (ch.is_alphanumeric(), run_start) {
                (true, None) => run_start = Some(offset),
                (false, Some(start)) => {
                    let position = tokens.len();
                    tokens.push(Token::new(
                        self.normalize(&text[start..offset]),
                        start,
                        offset,
                        position,
                    ));
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some(start) = run_start {
            let position = tokens.len();
            tokens.push(Token::new(
                self.normalize(&text[start..]),
                start,
                text.len(),
                position,
            ));
        }

        tokens
    }
}
