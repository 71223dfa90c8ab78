use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::indicator::IndicatorSettings;
use crate::market_data::MAX_HISTORY_DAYS;
use crate::planner::TaxRules;

pub const API_BASE_URL_ENV: &str = "SIP_BREWERY_API_BASE_URL";
pub const CONFIG_PATH_ENV: &str = "SIP_BREWERY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub planner: TaxRules,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_history_days() -> u32 {
    120
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ApiConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::load_from_path(&config_path())?;
        config.apply_env_overrides(std::env::var(API_BASE_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// The environment wins over the file for the API base URL.
    pub fn apply_env_overrides(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.map(|u| u.trim().to_string()) {
            if !url.is_empty() {
                self.api.base_url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url '{}' is not a valid URL", self.api.base_url))?;
        if self.api.timeout_ms == 0 {
            bail!("api.timeout_ms must be > 0");
        }
        if self.api.history_days == 0 || self.api.history_days > MAX_HISTORY_DAYS {
            bail!(
                "api.history_days must be within 1..={}, got {}",
                MAX_HISTORY_DAYS,
                self.api.history_days
            );
        }

        let ind = &self.indicators;
        for (name, period) in [
            ("indicators.sma_period", ind.sma_period),
            ("indicators.ema_period", ind.ema_period),
            ("indicators.rsi_period", ind.rsi_period),
            ("indicators.macd.fast", ind.macd.fast),
            ("indicators.macd.slow", ind.macd.slow),
            ("indicators.macd.signal", ind.macd.signal),
        ] {
            if period == 0 {
                bail!("{} must be > 0", name);
            }
        }
        if ind.macd.fast >= ind.macd.slow {
            bail!(
                "indicators.macd.fast ({}) must be smaller than indicators.macd.slow ({})",
                ind.macd.fast,
                ind.macd.slow
            );
        }
        self.planner
            .validate()
            .context("invalid [planner] tax rules")?;
        Ok(())
    }
}
