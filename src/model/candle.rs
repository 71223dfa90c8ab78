use serde::{Deserialize, Serialize};

fn finite<E: serde::de::Error>(v: f64) -> Result<f64, E> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(E::custom(format!("non-finite value {}", v)))
    }
}

/// Backend payloads send prices either as JSON numbers or numeric strings.
/// `NaN` and infinities are rejected.
pub fn string_or_number_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    let parsed: Result<f64, D::Error> = match v {
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("invalid number")),
        _ => Err(serde::de::Error::custom("invalid numeric value")),
    };
    finite(parsed?)
}

fn string_or_number_to_f64_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    let parsed: Result<f64, D::Error> = match v {
        serde_json::Value::Null => Ok(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("invalid number")),
        _ => Err(serde::de::Error::custom("invalid numeric value")),
    };
    finite(parsed?)
}

/// One OHLCV bar. `time` is a Unix timestamp in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickData {
    pub time: i64,
    #[serde(deserialize_with = "string_or_number_to_f64")]
    pub open: f64,
    #[serde(deserialize_with = "string_or_number_to_f64")]
    pub high: f64,
    #[serde(deserialize_with = "string_or_number_to_f64")]
    pub low: f64,
    #[serde(deserialize_with = "string_or_number_to_f64")]
    pub close: f64,
    #[serde(default, deserialize_with = "string_or_number_to_f64_default")]
    pub volume: f64,
}

impl CandlestickData {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Closing prices in candle order.
pub fn closes(candles: &[CandlestickData]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Order by ascending time; for duplicate timestamps the later entry wins.
pub fn sort_and_dedup(mut candles: Vec<CandlestickData>) -> Vec<CandlestickData> {
    // Stable sort keeps arrival order among equal times.
    candles.sort_by_key(|c| c.time);
    let mut out: Vec<CandlestickData> = Vec::with_capacity(candles.len());
    for candle in candles {
        match out.last_mut() {
            Some(last) if last.time == candle.time => *last = candle,
            _ => out.push(candle),
        }
    }
    out
}
