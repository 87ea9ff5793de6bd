//! Output formatting module

use anyhow::Result;
use phrasetag_core::Tag;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the tags found in one document
    fn format_document(&mut self, source: &str, tags: &[Tag]) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
