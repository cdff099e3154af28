use core::fmt::{Debug, Display};
use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

pub const DEFAULT_REPEAT_THRESHOLD: f64 = 0.8;

/// How a round's groups are evened out after the two assignment passes.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceStrategy {
    /// Move the last member of an oversized group into the first undersized one.
    #[default]
    Greedy,
    /// Like [`BalanceStrategy::Greedy`] but never moves somebody into a topic they already
    /// attended in an earlier round.
    HistoryAware,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Fraction of the active participants that has to be eligible for a round's topics before
    /// repeats are allowed for everybody.
    pub repeat_threshold: f64,
    pub balance_strategy: BalanceStrategy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            repeat_threshold: DEFAULT_REPEAT_THRESHOLD,
            balance_strategy: BalanceStrategy::default(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
    #[error("repeat threshold must be between 0 and 1 but is {0}")]
    RepeatThreshold(f64),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&self.repeat_threshold) {
            Ok(())
        } else {
            Err(ConfigError::RepeatThreshold(self.repeat_threshold))
        }
    }
}

pub fn get_config() -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Toml::file("unconference.toml"))
        .merge(Env::prefixed("UNCONF_").split("__"))
        .extract()?;
    config.scheduler.validate()?;
    Ok(config)
}
