use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Display and export settings.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// decimals = 2
/// na_text = "-"
/// separator = ","
/// point_size = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdsConfig {
    /// Decimal places shown in the table. Computation is not rounded.
    pub decimals: u32,
    /// Placeholder for values that are not available yet.
    pub na_text: String,
    /// Separator used for the single-line export.
    pub separator: String,
    /// Radius hosts should draw picked points with.
    pub point_size: f64,
}

impl Default for SdsConfig {
    fn default() -> Self {
        Self {
            decimals: 4,
            na_text: "N/A".to_string(),
            separator: "\t".to_string(),
            point_size: 5.0,
        }
    }
}

impl SdsConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: SdsConfig = toml::from_str(text).context("failed to parse SDS config")?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {:?}", path.as_ref()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("invalid config in {:?}", path.as_ref()))?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}
