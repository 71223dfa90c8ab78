/// Simple Moving Average using a ring buffer for O(1) push.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    buffer: Vec<f64>,
    head: usize,
    count: usize,
    sum: f64,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be > 0");
        Self {
            period,
            buffer: vec![0.0; period],
            head: 0,
            count: 0,
            sum: 0.0,
        }
    }

    /// Push a new value, return the current SMA if enough data.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.count >= self.period {
            self.sum -= self.buffer[self.head];
        }
        self.buffer[self.head] = value;
        self.sum += value;
        self.head = (self.head + 1) % self.period;
        if self.count < self.period {
            self.count += 1;
        }
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.is_ready() {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Trailing mean for every index of `closes`; `NaN` until `period` samples exist.
pub fn sma_series(closes: &[f64], period: usize) -> Vec<f64> {
    let mut sma = Sma::new(period);
    closes
        .iter()
        .map(|&c| sma.push(c).unwrap_or(f64::NAN))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_pads_warmup_with_nan() {
        let out = sma_series(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out.len(), 4);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!((out[2] - 2.0).abs() < f64::EPSILON);
        assert!((out[3] - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn series_shorter_than_period_is_all_nan() {
        let out = sma_series(&[5.0, 6.0], 5);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn empty_series_is_empty() {
        assert!(sma_series(&[], 3).is_empty());
    }

    #[test]
    fn ring_buffer_wraps_correctly() {
        let mut sma = Sma::new(3);
        sma.push(10.0);
        sma.push(20.0);
        sma.push(30.0);
        // [40, 20, 30]
        let v = sma.push(40.0).unwrap();
        assert!((v - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "SMA period must be > 0")]
    fn zero_period_panics() {
        Sma::new(0);
    }
}
