//! Tab-separated text output formatter

use super::OutputFormatter;
use anyhow::Result;
use phrasetag_core::Tag;
use std::io::Write;

/// Text formatter: one line per tag
///
/// Columns are `source`, `start`, `end`, comma-joined identifiers and,
/// when present, the matched text with tabs and line breaks flattened.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn flatten(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, source: &str, tags: &[Tag]) -> Result<()> {
        for tag in tags {
            write!(
                self.writer,
                "{}\t{}\t{}\t{}",
                source,
                tag.start_offset,
                tag.end_offset,
                tag.ids.join(",")
            )?;
            if let Some(text) = &tag.match_text {
                write!(self.writer, "\t{}", flatten(text))?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
