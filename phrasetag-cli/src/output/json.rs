//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use phrasetag_core::Tag;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs one record per document as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<DocumentTags>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentTags {
    /// Path of the tagged document
    pub source: String,
    /// Number of tags found
    pub tags_count: usize,
    /// The tags themselves
    pub tags: Vec<Tag>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, source: &str, tags: &[Tag]) -> Result<()> {
        self.documents.push(DocumentTags {
            source: source.to_string(),
            tags_count: tags.len(),
            tags: tags.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_output() {
        let mut out = Vec::new();
        let mut formatter = JsonFormatter::new(&mut out, false);
        formatter
            .format_document(
                "doc.txt",
                &[Tag {
                    start_offset: 0,
                    end_offset: 6,
                    byte_start: 0,
                    byte_end: 6,
                    match_text: None,
                    ids: vec!["1".to_string()],
                }],
            )
            .unwrap();
        formatter.format_document("empty.txt", &[]).unwrap();
        formatter.finish().unwrap();

        let parsed: Vec<DocumentTags> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].source, "doc.txt");
        assert_eq!(parsed[0].tags_count, 1);
        assert_eq!(parsed[0].tags[0].ids, vec!["1"]);
        assert_eq!(parsed[1].tags_count, 0);

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("match_text"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_pretty_output_of_nothing() {
        let mut out = Vec::new();
        let mut formatter = JsonFormatter::new(&mut out, true);
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
