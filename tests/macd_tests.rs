use sip_brewery::indicator::ema::ema_series;
use sip_brewery::indicator::macd::{macd_series, Macd, MacdParams};

fn wave(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.21).sin() * 6.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn histogram_is_exactly_macd_minus_signal() {
    let series = macd_series(&wave(300), MacdParams::default());
    assert_eq!(series.len(), 300);
    for i in 0..series.len() {
        assert_eq!(series.histogram[i], series.macd[i] - series.signal[i]);
    }
}

#[test]
fn macd_line_is_fast_minus_slow_ema() {
    let closes = wave(120);
    let fast = ema_series(&closes, 12);
    let slow = ema_series(&closes, 26);
    let series = macd_series(&closes, MacdParams::default());
    for i in 0..closes.len() {
        assert!((series.macd[i] - (fast[i] - slow[i])).abs() < 1e-12);
    }
}

#[test]
fn signal_is_ema_of_macd() {
    let closes = wave(120);
    let series = macd_series(&closes, MacdParams::default());
    let signal = ema_series(&series.macd, 9);
    for i in 0..closes.len() {
        assert!((series.signal[i] - signal[i]).abs() < 1e-12);
    }
}

#[test]
fn constant_prices_give_zero_lines() {
    let series = macd_series(&[73.0; 60], MacdParams::default());
    assert!(series.macd.iter().all(|v| *v == 0.0));
    assert!(series.histogram.iter().all(|v| *v == 0.0));
}

#[test]
fn ready_after_slow_and_signal_warmup() {
    let mut macd = Macd::new(MacdParams {
        fast: 2,
        slow: 4,
        signal: 3,
    });
    for p in [1.0, 2.0, 3.0] {
        macd.push(p);
        assert!(!macd.is_ready());
    }
    macd.push(4.0);
    assert!(macd.is_ready());
    assert_eq!(macd.params().slow, 4);
}

#[test]
fn empty_input() {
    let series = macd_series(&[], MacdParams::default());
    assert!(series.is_empty());
    assert_eq!(series.point(0), None);
}
