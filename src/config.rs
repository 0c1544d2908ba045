use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{BenchmarkTable, Category};
use crate::session::DEFAULT_INCOME;

pub(crate) const CONFIG_ENV: &str = "WALLETUI_CONFIG";

/// Runtime settings, read from `config.toml`. Every field has a default, so a
/// missing file is fine.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) currency: String,
    pub(crate) income: Decimal,
    pub(crate) forecast_horizon: usize,
    pub(crate) history_months: usize,
    pub(crate) benchmark: BenchmarkTable,
    pub(crate) high_contrast: bool,
    pub(crate) transcription: TranscriptionConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TranscriptionConfig {
    pub(crate) endpoint: Option<String>,
    pub(crate) language: String,
    pub(crate) timeout_secs: u64,
}

impl TranscriptionConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            language: "en-US".into(),
            timeout_secs: 15,
        }
    }
}

/// On-disk shape. Benchmark keys stay strings here so unknown names can be
/// reported by name.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    currency: Option<String>,
    income: Option<Decimal>,
    forecast_horizon: Option<usize>,
    history_months: Option<usize>,
    benchmark: BTreeMap<String, Decimal>,
    high_contrast: bool,
    transcription: TranscriptionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "DA".into(),
            income: Decimal::from(DEFAULT_INCOME),
            forecast_horizon: 3,
            history_months: 6,
            benchmark: BenchmarkTable::default(),
            high_contrast: false,
            transcription: TranscriptionConfig::default(),
        }
    }
}

impl Config {
    /// Load from `$WALLETUI_CONFIG`, or the platform config directory.
    pub(crate) fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => match default_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("no config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        Self::load_from(&path)
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text).context("Failed to parse TOML")?;
        let defaults = Self::default();

        let mut benchmark = defaults.benchmark;
        let mut unknown = Vec::new();
        for (name, amount) in raw.benchmark {
            match Category::parse(&name) {
                Some(category) => {
                    if amount < Decimal::ZERO {
                        anyhow::bail!("Benchmark for {category} cannot be negative: {amount}");
                    }
                    benchmark = benchmark.with(category, amount);
                }
                None => unknown.push(name),
            }
        }
        if !unknown.is_empty() {
            anyhow::bail!("Unknown benchmark categories: {}", unknown.join(", "));
        }

        let forecast_horizon = raw.forecast_horizon.unwrap_or(defaults.forecast_horizon);
        if forecast_horizon == 0 {
            anyhow::bail!("forecast_horizon must be at least 1");
        }

        let income = raw.income.unwrap_or(defaults.income);
        if income < Decimal::ZERO {
            anyhow::bail!("income cannot be negative: {income}");
        }

        Ok(Self {
            currency: raw.currency.unwrap_or(defaults.currency),
            income,
            forecast_horizon,
            history_months: raw.history_months.unwrap_or(defaults.history_months),
            benchmark,
            high_contrast: raw.high_contrast,
            transcription: raw.transcription,
        })
    }
}

fn default_path() -> Option<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "walletui", "WalleTUI")?;
    Some(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
