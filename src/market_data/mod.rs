pub mod client;
pub mod demo;

pub use client::{parse_candles_payload, CandleLoad, DataSource, FundDataClient, MAX_HISTORY_DAYS};
