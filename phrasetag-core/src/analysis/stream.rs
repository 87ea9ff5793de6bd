//! Validated token streams

use crate::error::{Result, TaggerError};
use crate::types::Token;

/// A token sequence that has been checked against its document
///
/// Invariants once constructed:
/// - positions run 0, 1, 2, ... without gaps
/// - every token has `start_offset <= end_offset` and non-empty text
/// - offsets never decrease and tokens never overlap
/// - offsets fall on character boundaries inside the document
#[derive(Debug, Clone)]
pub struct TokenStream<'t> {
    text: &'t str,
    tokens: Vec<Token>,
}

impl<'t> TokenStream<'t> {
    /// Validate `tokens` against `text`
    pub fn new(text: &'t str, tokens: Vec<Token>) -> Result<Self> {
        let mut previous_end = 0;

        for (index, token) in tokens.iter().enumerate() {
            if token.position != index {
                return Err(TaggerError::invalid_stream(
                    index,
                    format!("expected position {index}, found {}", token.position),
                ));
            }
            if token.text.is_empty() {
                return Err(TaggerError::invalid_stream(index, "empty token text"));
            }
            if token.start_offset > token.end_offset {
                return Err(TaggerError::invalid_stream(
                    index,
                    format!(
                        "start offset {} is past end offset {}",
                        token.start_offset, token.end_offset
                    ),
                ));
            }
            if token.start_offset < previous_end {
                return Err(TaggerError::invalid_stream(
                    index,
                    format!(
                        "start offset {} overlaps previous token ending at {previous_end}",
                        token.start_offset
                    ),
                ));
            }
            if token.end_offset > text.len() {
                return Err(TaggerError::invalid_stream(
                    index,
                    format!(
                        "end offset {} is beyond document length {}",
                        token.end_offset,
                        text.len()
                    ),
                ));
            }
            if !text.is_char_boundary(token.start_offset) || !text.is_char_boundary(token.end_offset)
            {
                return Err(TaggerError::invalid_stream(
                    index,
                    "offset splits a UTF-8 character",
                ));
            }
            previous_end = token.end_offset;
        }

        Ok(Self { text, tokens })
    }

    /// The document the tokens point into
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// The validated tokens
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_stream() {
        let text = "City of London";
        let tokens = vec![
            Token::new("city", 0, 4, 0),
            Token::new("of", 5, 7, 1),
            Token::new("london", 8, 14, 2),
        ];
        let stream = TokenStream::new(text, tokens).unwrap();
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.text(), text);
    }

    #[test]
    fn test_accepts_adjacent_tokens() {
        let tokens = vec![Token::new("ab", 0, 2, 0), Token::new("cd", 2, 4, 1)];
        assert!(TokenStream::new("abcd", tokens).is_ok());
    }

    #[test]
    fn test_rejects_overlapping_offsets() {
        let tokens = vec![Token::new("city", 0, 4, 0), Token::new("ty", 2, 4, 1)];
        let err = TokenStream::new("City", tokens).unwrap_err();
        assert!(matches!(err, TaggerError::InvalidTokenStream { index: 1, .. }));
    }

    #[test]
    fn test_rejects_decreasing_offsets() {
        let tokens = vec![Token::new("of", 5, 7, 0), Token::new("city", 0, 4, 1)];
        let err = TokenStream::new("City of", tokens).unwrap_err();
        assert!(matches!(err, TaggerError::InvalidTokenStream { index: 1, .. }));
    }

    #[test]
    fn test_rejects_inverted_token() {
        let tokens = vec![Token::new("city", 4, 0, 0)];
        assert!(TokenStream::new("City", tokens).is_err());
    }

    #[test]
    fn test_rejects_position_gap() {
        let tokens = vec![Token::new("city", 0, 4, 0), Token::new("of", 5, 7, 2)];
        let err = TokenStream::new("City of", tokens).unwrap_err();
        assert!(err.to_string().contains("expected position 1"));
    }

    #[test]
    fn test_rejects_out_of_bounds_and_split_chars() {
        let tokens = vec![Token::new("city", 0, 40, 0)];
        assert!(TokenStream::new("City", tokens).is_err());

        // 'ü' occupies bytes 1..3
        let tokens = vec![Token::new("z", 0, 2, 0)];
        assert!(TokenStream::new("Zürich", tokens).is_err());
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::new("", Vec::new()).unwrap();
        assert!(stream.is_empty());
    }
}
