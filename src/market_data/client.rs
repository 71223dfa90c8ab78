use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AppError;
use crate::model::candle::{sort_and_dedup, CandlestickData};

use super::demo::{self, SECONDS_PER_DAY};

const DEMO_START_PRICE: f64 = 100.0;
/// Longest history a caller may request, about ten years of daily candles.
pub const MAX_HISTORY_DAYS: u32 = 3_650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Demo,
}

/// Candles plus where they came from. `error` is set whenever the demo
/// fallback was used.
#[derive(Debug, Clone, Serialize)]
pub struct CandleLoad {
    pub candles: Vec<CandlestickData>,
    pub source: DataSource,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CandlesResponse {
    Bare(Vec<CandlestickData>),
    Wrapped { candles: Vec<CandlestickData> },
}

/// Decode a candles payload, either a bare array or `{"candles": [...]}`.
pub fn parse_candles_payload(body: &str) -> Result<Vec<CandlestickData>, AppError> {
    let candles = match serde_json::from_str::<CandlesResponse>(body)? {
        CandlesResponse::Bare(c) => c,
        CandlesResponse::Wrapped { candles } => candles,
    };
    Ok(sort_and_dedup(candles))
}

pub struct FundDataClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FundDataClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(AppError::from)
            .with_context(|| format!("invalid fund API base URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("'{}' cannot be used as a base URL", base_url)).into());
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/funds/{code}/candles?days={days}`
    pub fn candles_url(&self, fund_code: &str, days: u32) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("'{}' cannot be used as a base URL", self.base_url))?
            .pop_if_empty()
            .extend(["api", "funds", fund_code, "candles"]);
        url.query_pairs_mut()
            .append_pair("days", &days.to_string());
        Ok(url)
    }

    pub async fn fetch_candles(&self, fund_code: &str, days: u32) -> Result<Vec<CandlestickData>> {
        let url = self.candles_url(fund_code, days)?;
        tracing::debug!(%url, "Fetching fund candles");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("fetch_candles HTTP failed")?;

        let status = resp.status();
        let body = resp.text().await.context("failed to read candles body")?;
        if !status.is_success() {
            return Err(AppError::FundApi {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let candles = parse_candles_payload(&body).context("failed to decode candles payload")?;
        tracing::info!(fund = fund_code, count = candles.len(), "Fetched fund candles");
        Ok(candles)
    }

    /// Fetch candles, substituting demo data on any failure so charts never render empty.
    pub async fn load_candles_or_demo(&self, fund_code: &str, days: u32) -> CandleLoad {
        match self.fetch_candles(fund_code, days).await {
            Ok(candles) if !candles.is_empty() => CandleLoad {
                candles,
                source: DataSource::Live,
                error: None,
            },
            Ok(_) => {
                tracing::warn!(fund = fund_code, "Fund API returned no candles, using demo data");
                demo_load(fund_code, days, "fund API returned no candles".to_string())
            }
            Err(e) => {
                let error = format!("{:#}", e);
                tracing::warn!(fund = fund_code, error = %error, "Failed to fetch candles, using demo data");
                demo_load(fund_code, days, error)
            }
        }
    }
}

fn demo_load(fund_code: &str, days: u32, error: String) -> CandleLoad {
    let days = days.min(MAX_HISTORY_DAYS);
    let now = chrono::Utc::now().timestamp();
    let today = now - now.rem_euclid(SECONDS_PER_DAY);
    CandleLoad {
        candles: demo::generate(demo::seed_for(fund_code), days as usize, DEMO_START_PRICE, today),
        source: DataSource::Demo,
        error: Some(error),
    }
}
