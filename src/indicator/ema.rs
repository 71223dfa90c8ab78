/// Exponential Moving Average seeded by the first observed value.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
    ema: Option<f64>,
    count: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            ema: None,
            count: 0,
        }
    }

    /// Push a new value and return the updated EMA.
    ///
    /// The first push returns the value itself; the line is defined from
    /// then on, so this never returns `None`.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let next = match self.ema {
            Some(prev) => (value - prev) * self.multiplier + prev,
            None => value,
        };
        self.ema = Some(next);
        self.count = self.count.saturating_add(1);
        self.ema
    }

    pub fn value(&self) -> Option<f64> {
        self.ema
    }

    /// True once `period` samples have been folded in.
    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

/// EMA at every index of `values`. Empty input gives empty output.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut ema = Ema::new(period);
    values
        .iter()
        .map(|&v| ema.push(v).unwrap_or(f64::NAN))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_by_first_value() {
        let mut ema = Ema::new(3);
        assert_eq!(ema.push(10.0), Some(10.0));
        assert!(!ema.is_ready());
        // k = 0.5
        let v = ema.push(20.0).unwrap();
        assert!((v - 15.0).abs() < f64::EPSILON);
        let v = ema.push(20.0).unwrap();
        assert!((v - 17.5).abs() < f64::EPSILON);
        assert!(ema.is_ready());
    }

    #[test]
    fn multiplier_matches_period() {
        let ema = Ema::new(9);
        assert!((ema.multiplier() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "EMA period must be > 0")]
    fn zero_period_panics() {
        Ema::new(0);
    }
}
