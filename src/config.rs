use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::LineFilter;

/// Environment variable holding the path of a JSON config file.
pub const CONFIG_ENV: &str = "RUSTY_LATTICE_CONFIG";

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// Tunables of the analysis pipeline. Every field has a default, so a
/// config file only needs to name what it changes:
///
/// ```json
/// { "min_samples": 20, "peaks": { "min_separation": 5 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Files with fewer parsed samples are rejected.
    pub min_samples: usize,
    pub peaks: PeakConfig,
    pub parser: ParserConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_samples: 5,
            peaks: PeakConfig::default(),
            parser: ParserConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        log::info!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Load the file named by `RUSTY_LATTICE_CONFIG`, or the defaults when
    /// the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Line filter with the configured extra markers applied.
    pub fn line_filter(&self) -> LineFilter {
        LineFilter::with_extra(&self.parser.extra_comment_markers, &self.parser.extra_keywords)
    }
}

/// Peak detection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakConfig {
    /// Minimum prominence as a fraction of the maximum intensity.
    pub prominence_fraction: f64,
    /// Minimum distance between peaks, in samples.
    pub min_separation: usize,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            prominence_fraction: 0.02,
            min_separation: 10,
        }
    }
}

/// Additions to the built-in line rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub extra_comment_markers: Vec<char>,
    pub extra_keywords: Vec<String>,
}
