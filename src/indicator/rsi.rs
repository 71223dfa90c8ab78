/// Wilder relative strength index.
///
/// The first `period` price changes are averaged arithmetically; after that
/// each average is smoothed as `(prev * (period - 1) + current) / period`.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_price: Option<f64>,
    warmup_count: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: Option<f64>,
    avg_loss: Option<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        Self {
            period,
            prev_price: None,
            warmup_count: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: None,
            avg_loss: None,
        }
    }

    /// Push a price, return the RSI once `period` changes have been seen.
    pub fn push(&mut self, price: f64) -> Option<f64> {
        let prev = self.prev_price.replace(price)?;

        let delta = price - prev;
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        match (self.avg_gain, self.avg_loss) {
            (Some(prev_gain), Some(prev_loss)) => {
                let period = self.period as f64;
                self.avg_gain = Some((prev_gain * (period - 1.0) + gain) / period);
                self.avg_loss = Some((prev_loss * (period - 1.0) + loss) / period);
            }
            _ => {
                self.gain_sum += gain;
                self.loss_sum += loss;
                self.warmup_count += 1;
                if self.warmup_count >= self.period {
                    self.avg_gain = Some(self.gain_sum / self.period as f64);
                    self.avg_loss = Some(self.loss_sum / self.period as f64);
                }
            }
        }
        self.value()
    }

    /// Current RSI. A window with no losses reads 100, a flat window reads 50.
    pub fn value(&self) -> Option<f64> {
        let avg_gain = self.avg_gain?;
        let avg_loss = self.avg_loss?;
        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                return Some(50.0);
            }
            return Some(100.0);
        }
        let rs = avg_gain / avg_loss;
        Some((100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0))
    }

    pub fn is_ready(&self) -> bool {
        self.avg_gain.is_some()
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// RSI at every index of `closes`; `NaN` for the first `period` indices.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let mut rsi = Rsi::new(period);
    closes
        .iter()
        .map(|&c| rsi.push(c).unwrap_or(f64::NAN))
        .collect()
}
