use serde::{Deserialize, Serialize};

use crate::model::candle::{closes, CandlestickData};

use super::ema::ema_series;
use super::macd::{macd_series, MacdParams, MacdSeries};
use super::rsi::rsi_series;
use super::sma::sma_series;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSettings {
    #[serde(default = "default_sma_period")]
    pub sma_period: usize,
    #[serde(default = "default_ema_period")]
    pub ema_period: usize,
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    #[serde(default)]
    pub macd: MacdParams,
}

fn default_sma_period() -> usize {
    20
}

fn default_ema_period() -> usize {
    20
}

fn default_rsi_period() -> usize {
    14
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma_period: default_sma_period(),
            ema_period: default_ema_period(),
            rsi_period: default_rsi_period(),
            macd: MacdParams::default(),
        }
    }
}

/// Every indicator line for a candle series, aligned index-for-index.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorOverlay {
    pub time: Vec<i64>,
    pub sma: Vec<f64>,
    pub ema: Vec<f64>,
    pub rsi: Vec<f64>,
    pub macd: MacdSeries,
}

impl IndicatorOverlay {
    pub fn compute(candles: &[CandlestickData], settings: &IndicatorSettings) -> Self {
        let closes = closes(candles);
        Self {
            time: candles.iter().map(|c| c.time).collect(),
            sma: sma_series(&closes, settings.sma_period),
            ema: ema_series(&closes, settings.ema_period),
            rsi: rsi_series(&closes, settings.rsi_period),
            macd: macd_series(&closes, settings.macd),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn latest(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            time: self.time.last().copied(),
            sma: last_defined(&self.sma),
            ema: last_defined(&self.ema),
            rsi: last_defined(&self.rsi),
            macd: last_defined(&self.macd.macd),
            macd_signal: last_defined(&self.macd.signal),
            macd_histogram: last_defined(&self.macd.histogram),
        }
    }
}

fn last_defined(series: &[f64]) -> Option<f64> {
    series.last().copied().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Neutral,
    Bearish,
}

/// Last value of each indicator; `None` where history is insufficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub time: Option<i64>,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn rsi_zone(&self) -> Option<RsiZone> {
        let rsi = self.rsi?;
        Some(if rsi <= RSI_OVERSOLD {
            RsiZone::Oversold
        } else if rsi >= RSI_OVERBOUGHT {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        })
    }

    pub fn trend(&self) -> Option<Trend> {
        let macd = self.macd?;
        let signal = self.macd_signal?;
        Some(if macd > signal {
            Trend::Bullish
        } else if macd < signal {
            Trend::Bearish
        } else {
            Trend::Neutral
        })
    }
}
