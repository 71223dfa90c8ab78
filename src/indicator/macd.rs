use serde::{Deserialize, Serialize};

use super::ema::Ema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Streaming MACD: fast EMA minus slow EMA, with an EMA signal line.
#[derive(Debug, Clone)]
pub struct Macd {
    params: MacdParams,
    fast_ema: Ema,
    slow_ema: Ema,
    signal_ema: Ema,
    last: Option<MacdPoint>,
}

impl Macd {
    pub fn new(params: MacdParams) -> Self {
        Self {
            params,
            fast_ema: Ema::new(params.fast),
            slow_ema: Ema::new(params.slow),
            signal_ema: Ema::new(params.signal),
            last: None,
        }
    }

    pub fn push(&mut self, price: f64) -> Option<MacdPoint> {
        let fast = self.fast_ema.push(price)?;
        let slow = self.slow_ema.push(price)?;
        let macd = fast - slow;
        let signal = self.signal_ema.push(macd)?;
        let point = MacdPoint {
            macd,
            signal,
            histogram: macd - signal,
        };
        self.last = Some(point);
        self.last
    }

    pub fn value(&self) -> Option<MacdPoint> {
        self.last
    }

    /// True once the slow EMA and the signal line are both past warm-up.
    pub fn is_ready(&self) -> bool {
        self.slow_ema.is_ready() && self.signal_ema.is_ready()
    }

    pub fn params(&self) -> MacdParams {
        self.params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<MacdPoint> {
        Some(MacdPoint {
            macd: *self.macd.get(index)?,
            signal: *self.signal.get(index)?,
            histogram: *self.histogram.get(index)?,
        })
    }
}

pub fn macd_series(closes: &[f64], params: MacdParams) -> MacdSeries {
    let mut macd = Macd::new(params);
    let mut out = MacdSeries {
        macd: Vec::with_capacity(closes.len()),
        signal: Vec::with_capacity(closes.len()),
        histogram: Vec::with_capacity(closes.len()),
    };
    for &close in closes {
        match macd.push(close) {
            Some(p) => {
                out.macd.push(p.macd);
                out.signal.push(p.signal);
                out.histogram.push(p.histogram);
            }
            None => {
                out.macd.push(f64::NAN);
                out.signal.push(f64::NAN);
                out.histogram.push(f64::NAN);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_point_is_flat() {
        let mut macd = Macd::new(MacdParams::default());
        let p = macd.push(100.0).unwrap();
        assert_eq!(p.macd, 0.0);
        assert_eq!(p.signal, 0.0);
        assert_eq!(p.histogram, 0.0);
        assert!(!macd.is_ready());
    }

    #[test]
    fn rising_prices_push_macd_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = macd_series(&closes, MacdParams::default());
        let last = series.point(series.len() - 1).unwrap();
        assert!(last.macd > 0.0);
        assert!(last.histogram > 0.0);
    }
}
