//! Demo scenario definition
//!
//! Parameters for a pagination run, loadable from YAML.

use crate::engine::EngineConfig;
use crate::error::{Error, Result};
use crate::source::BoundsPolicy;
use serde::Deserialize;
use std::path::Path;

/// A pagination run over the numbers `1..=total`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Number of items in the source
    pub total: usize,
    /// Items per page
    pub page_size: usize,
    /// Load-more triggers fired after the first page settles
    pub loads: usize,
    /// Initial cursor
    pub start: usize,
    /// Simulated latency per fetch in milliseconds
    pub delay_ms: u64,
    /// Offset at which every fetch fails
    pub fail_at: Option<usize>,
    /// How pages running past the end are answered
    pub bounds: BoundsPolicy,
    /// Engine settings
    pub engine: EngineConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            total: 100,
            page_size: 10,
            loads: 3,
            start: 0,
            delay_ms: 0,
            fail_at: None,
            bounds: BoundsPolicy::Truncate,
            engine: EngineConfig::default(),
        }
    }
}

impl Scenario {
    /// Parse a scenario from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read scenario '{}': {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Check the scenario makes sense
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        if self.start > self.total {
            return Err(Error::invalid_value(
                "start",
                format!("{} is past the end of a {}-item source", self.start, self.total),
            ));
        }
        Ok(())
    }
}
