//! Configuration API for tagging

use crate::error::{Result, TaggerError};
use crate::index::PhraseIndex;
use crate::overlap::OverlapPolicy;
use crate::types::MatchMode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tagging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where matches may begin and end inside a phrase
    pub mode: MatchMode,
    /// How nested and overlapping candidates are filtered
    pub overlaps: OverlapPolicy,
    /// Attach the matched substring to every tag
    pub match_text: bool,
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration against an index
    pub fn validate_for(&self, index: &PhraseIndex) -> Result<()> {
        if !index.supports(self.mode) {
            return Err(TaggerError::ModeNotIndexed(self.mode));
        }
        Ok(())
    }
}

/// Fluent builder for configuration
///
/// String-valued settings are parsed at `build()` time so that unknown
/// names surface as errors instead of silently falling back.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    mode: Option<String>,
    overlaps: Option<String>,
    match_text: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match mode
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = Some(mode.name().to_string());
        self
    }

    /// Set the match mode by name (`WHOLE`, `PARTIAL`, `FRAGMENT`)
    pub fn mode_name(mut self, name: impl Into<String>) -> Self {
        self.mode = Some(name.into());
        self
    }

    /// Set the overlap policy
    pub fn overlaps(mut self, policy: OverlapPolicy) -> Self {
        self.overlaps = Some(policy.name().to_string());
        self
    }

    /// Set the overlap policy by name (`ALL`, `NO_SUB`)
    pub fn overlaps_name(mut self, name: impl Into<String>) -> Self {
        self.overlaps = Some(name.into());
        self
    }

    /// Attach matched text to tags
    pub fn match_text(mut self, enabled: bool) -> Self {
        self.match_text = Some(enabled);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(mode) = self.mode {
            config.mode = MatchMode::from_str(&mode)?;
        }

        if let Some(policy) = self.overlaps {
            config.overlaps = OverlapPolicy::from_str(&policy)?;
        }

        if let Some(enabled) = self.match_text {
            config.match_text = enabled;
        }

        Ok(config)
    }
}
