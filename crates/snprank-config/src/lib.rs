//! Configuration loading for SNPrank.
//! Reads snprank.toml from the path in SNPRANK_CONFIG, or from the current directory if present.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snprank_common::{Result, SnpRankError};
use tracing::{debug, warn};

mod tests;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SNPRANK_CONFIG";

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "snprank.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnpRankConfig {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ── Ranking ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Damping factor balancing link propagation against main-effect teleportation
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    /// Safety cap on power iterations. Unset means iterate until converged.
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

pub fn default_gamma() -> f64 { 0.85 }

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            gamma: default_gamma(),
            max_iterations: None,
        }
    }
}

// ── Backend ─────────────────────────────────────────────────────────────────

/// Which implementation performs the G·D matrix product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Cpu,
    Accelerated,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cpu => write!(f, "cpu"),
            BackendKind::Accelerated => write!(f, "accelerated"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(BackendKind::Cpu),
            "accelerated" | "gpu" => Ok(BackendKind::Accelerated),
            other => Err(format!("unknown backend '{other}' (expected cpu or accelerated)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
}

// ── Output ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tab-separated `SNP SNPrank IG` table
    #[default]
    Tsv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected tsv or json)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

// ── Loading ─────────────────────────────────────────────────────────────────

impl SnpRankConfig {
    /// Load configuration.
    /// Checks SNPRANK_CONFIG first (the file must exist), then snprank.toml in
    /// the current directory, and falls back to defaults when neither is present.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_path(path);
        }
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_path(DEFAULT_CONFIG_FILE);
        }
        debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load and validate a specific config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SnpRankError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SnpRankConfig = toml::from_str(content)
            .map_err(|e| SnpRankError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    /// A gamma outside [0, 1) is unconventional but still accepted.
    pub fn validate(&self) -> Result<()> {
        let gamma = self.ranking.gamma;
        if !gamma.is_finite() {
            return Err(SnpRankError::Config(format!("gamma must be finite, got {gamma}")));
        }
        if !(0.0..1.0).contains(&gamma) {
            warn!("gamma = {gamma} is outside the conventional range [0, 1)");
        }
        if self.ranking.max_iterations == Some(0) {
            return Err(SnpRankError::Config("max_iterations must be at least 1".to_string()));
        }
        Ok(())
    }
}
