//! Technical indicators over closing prices.
//!
//! Each indicator has a streaming form (`push` one value at a time) and a
//! batch `*_series` form that returns one output per input, `NaN` where the
//! history is too short.

pub mod ema;
pub mod macd;
pub mod overlay;
pub mod rsi;
pub mod sma;

pub use ema::{ema_series, Ema};
pub use macd::{macd_series, Macd, MacdParams, MacdPoint, MacdSeries};
pub use overlay::{IndicatorOverlay, IndicatorSettings, IndicatorSnapshot, RsiZone, Trend};
pub use rsi::{rsi_series, Rsi};
pub use sma::{sma_series, Sma};
