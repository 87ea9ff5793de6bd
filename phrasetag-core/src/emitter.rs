//! Tag emission: from token spans to host-facing records

use crate::analysis::TokenStream;
use crate::index::PhraseIndex;
use crate::types::{CandidateMatch, Tag};

/// Options controlling what goes into each tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Attach the original matched substring
    pub include_match_text: bool,
}

/// Character span of every token, computed in one forward pass
///
/// Relies on the stream invariants: offsets are monotonic, on character
/// boundaries, and inside the text.
fn char_spans(stream: &TokenStream<'_>) -> Vec<(usize, usize)> {
    let text = stream.text();
    let mut spans = Vec::with_capacity(stream.len());
    let mut byte = 0;
    let mut chars = 0;

    for token in stream.tokens() {
        chars += text[byte..token.start_offset].chars().count();
        let start = chars;
        chars += text[token.start_offset..token.end_offset].chars().count();
        byte = token.end_offset;
        spans.push((start, chars));
    }

    spans
}

/// Turn resolved candidates into tags
///
/// Offsets come from the token stream: the start of the first token and the
/// end of the last. Match text is sliced from the raw document, never
/// rebuilt from normalized tokens.
pub fn emit(
    resolved: &[CandidateMatch],
    stream: &TokenStream<'_>,
    index: &PhraseIndex,
    options: EmitOptions,
) -> Vec<Tag> {
    if resolved.is_empty() {
        return Vec::new();
    }

    let tokens = stream.tokens();
    let spans = char_spans(stream);

    resolved
        .iter()
        .map(|candidate| {
            let byte_start = tokens[candidate.start].start_offset;
            let byte_end = tokens[candidate.end].end_offset;
            Tag {
                start_offset: spans[candidate.start].0,
                end_offset: spans[candidate.end].1,
                byte_start,
                byte_end,
                match_text: options
                    .include_match_text
                    .then(|| stream.text()[byte_start..byte_end].to_string()),
                ids: index.identifiers(candidate.ids).map(str::to_string).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{StandardTokenizer, Tokenizer};
    use crate::matcher::scan;
    use crate::types::{CorpusEntry, MatchMode};

    fn build(names: &[(&str, &str)]) -> PhraseIndex {
        let tokenizer = StandardTokenizer::new();
        let entries: Vec<CorpusEntry> = names
            .iter()
            .map(|(id, name)| CorpusEntry::from_text(*id, *name, &tokenizer))
            .collect();
        PhraseIndex::build(&entries, false)
    }

    #[test]
    fn test_offsets_and_match_text() {
        let index = build(&[("4", "City of London")]);
        let text = "In the CITY of  London, today";
        let stream = TokenStream::new(text, StandardTokenizer::new().tokenize(text)).unwrap();
        let candidates = scan(&stream, &index, MatchMode::Whole).unwrap();

        let tags = emit(
            &candidates,
            &stream,
            &index,
            EmitOptions {
                include_match_text: true,
            },
        );
        assert_eq!(tags.len(), 1);
        assert_eq!((tags[0].start_offset, tags[0].end_offset), (7, 22));
        // Raw casing and spacing survive
        assert_eq!(tags[0].match_text.as_deref(), Some("CITY of  London"));
        assert_eq!(tags[0].ids, vec!["4"]);
    }

    #[test]
    fn test_match_text_omitted_by_default() {
        let index = build(&[("0", "London")]);
        let text = "London";
        let stream = TokenStream::new(text, StandardTokenizer::new().tokenize(text)).unwrap();
        let candidates = scan(&stream, &index, MatchMode::Whole).unwrap();

        let tags = emit(&candidates, &stream, &index, EmitOptions::default());
        assert_eq!(tags[0].match_text, None);
        assert_eq!((tags[0].byte_start, tags[0].byte_end), (0, 6));
    }

    #[test]
    fn test_character_offsets_differ_from_bytes() {
        let index = build(&[("z", "Zürich")]);
        let text = "Grüße aus Zürich";
        let stream = TokenStream::new(text, StandardTokenizer::new().tokenize(text)).unwrap();
        let candidates = scan(&stream, &index, MatchMode::Whole).unwrap();

        let tags = emit(
            &candidates,
            &stream,
            &index,
            EmitOptions {
                include_match_text: true,
            },
        );
        assert_eq!((tags[0].start_offset, tags[0].end_offset), (10, 16));
        assert_eq!((tags[0].byte_start, tags[0].byte_end), (12, 19));
        assert_eq!(tags[0].match_text.as_deref(), Some("Zürich"));
    }

    #[test]
    fn test_identifier_order_follows_insertion() {
        let index = build(&[("20", "Paris"), ("3", "paris"), ("100", "PARIS")]);
        let text = "paris";
        let stream = TokenStream::new(text, StandardTokenizer::new().tokenize(text)).unwrap();
        let candidates = scan(&stream, &index, MatchMode::Whole).unwrap();

        let tags = emit(&candidates, &stream, &index, EmitOptions::default());
        assert_eq!(tags[0].ids, vec!["20", "3", "100"]);
    }
}
