use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::model::candle::CandlestickData;

pub const SECONDS_PER_DAY: i64 = 86_400;
const MAX_DAILY_MOVE: f64 = 0.025;
const MAX_WICK: f64 = 0.01;

/// Deterministic daily candles for when the fund API is unreachable.
///
/// The last candle is stamped `end_time`; earlier ones step back one day each.
pub fn generate(seed: u64, count: usize, start_price: f64, end_time: i64) -> Vec<CandlestickData> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    let mut open = if start_price.is_finite() && start_price > 0.0 {
        start_price
    } else {
        100.0
    };

    for i in 0..count {
        let days_back = (count - 1 - i) as i64;
        // slight upward drift, the usual shape of an equity NAV chart
        let change = rng.gen_range(-MAX_DAILY_MOVE..MAX_DAILY_MOVE) + 0.0005;
        let close = (open * (1.0 + change)).max(0.01);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..MAX_WICK));
        let low = (open.min(close) * (1.0 - rng.gen_range(0.0..MAX_WICK))).max(0.005);
        out.push(CandlestickData {
            time: end_time - days_back * SECONDS_PER_DAY,
            open,
            high,
            low,
            close,
            volume: rng.gen_range(100_000.0..1_000_000.0f64).round(),
        });
        open = close;
    }
    out
}

/// Stable seed per fund code so the same fund always shows the same demo chart.
pub fn seed_for(fund_code: &str) -> u64 {
    // FNV-1a
    fund_code
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
            (h ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_stable_per_code() {
        assert_eq!(seed_for("AXIS-BLUECHIP"), seed_for("AXIS-BLUECHIP"));
        assert_ne!(seed_for("AXIS-BLUECHIP"), seed_for("HDFC-TOP100"));
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate(1, 0, 100.0, 0).is_empty());
    }

    #[test]
    fn bad_start_price_falls_back() {
        let candles = generate(7, 1, -3.0, 0);
        assert!((candles[0].open - 100.0).abs() < f64::EPSILON);
    }
}
