//! Built-in candle set used when no CSV file is configured.

use candlescape_core::Candle;

use crate::DataSource;

/// 2025-02-23 09:00:00 UTC.
pub const SAMPLE_BASE_TIMESTAMP: f64 = 1_740_301_200.0;
pub const SAMPLE_INTERVAL: f64 = 86_400.0;
pub const DEFAULT_SAMPLE_COUNT: usize = PATTERNS.len();

/// Bearish reversal and continuation patterns as `[open, high, low, close]`,
/// each followed by a flat separator candle.
#[rustfmt::skip]
const PATTERNS: [[f32; 4]; 102] = [
    // Bearish Engulfing (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.0145, 1.016, 1.005, 1.006],
    [1.02, 1.02, 1.02, 1.02],
    // Hanging Man (1 candle)
    [1.01, 1.011, 0.99, 1.0105],
    [1.02, 1.02, 1.02, 1.02],
    // Shooting Star (1 candle)
    [1.01, 1.03, 1.009, 1.0105],
    [1.02, 1.02, 1.02, 1.02],
    // Evening Star (3 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.0145, 1.016, 1.014, 1.015],
    [1.015, 1.016, 1.005, 1.006],
    [1.02, 1.02, 1.02, 1.02],
    // Three Black Crows (3 candles)
    [1.015, 1.016, 1.01, 1.011],
    [1.011, 1.012, 1.007, 1.008],
    [1.008, 1.009, 1.004, 1.005],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Harami (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.013, 1.014, 1.012, 1.013],
    [1.02, 1.02, 1.02, 1.02],
    // Dark Cloud Cover (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.0145, 1.016, 1.01, 1.011],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Kicker (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.008, 1.009, 1.005, 1.006],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Abandoned Baby (3 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.015, 1.0155, 1.0145, 1.015],
    [1.012, 1.013, 1.008, 1.009],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Belt Hold (1 candle)
    [1.015, 1.015, 1.005, 1.006],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Marubozu (1 candle)
    [1.015, 1.015, 1.005, 1.005],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Counterattack (2 candles)
    [1.015, 1.016, 1.01, 1.011],
    [1.0105, 1.012, 1.008, 1.009],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Doji Star (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.014, 1.0145, 1.0135, 1.014],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Meeting Lines (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.013, 1.014, 1.012, 1.014],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Separating Lines (2 candles)
    [1.015, 1.016, 1.01, 1.011],
    [1.015, 1.016, 1.01, 1.011],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Side-by-Side Black Lines (3 candles)
    [1.015, 1.016, 1.01, 1.011],
    [1.0105, 1.011, 1.008, 1.009],
    [1.0105, 1.011, 1.008, 1.009],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Tasuki Gap (3 candles)
    [1.015, 1.016, 1.01, 1.011],
    [1.009, 1.01, 1.008, 1.009],
    [1.01, 1.017, 1.009, 1.016],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Three-Line Strike (4 candles)
    [1.015, 1.016, 1.01, 1.011],
    [1.011, 1.012, 1.008, 1.009],
    [1.009, 1.01, 1.006, 1.007],
    [1.007, 1.012, 1.0065, 1.011],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Breakaway (5 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.014, 1.016, 1.013, 1.015],
    [1.015, 1.017, 1.014, 1.016],
    [1.016, 1.018, 1.015, 1.017],
    [1.017, 1.018, 1.012, 1.013],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Ladder Top (5 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.014, 1.016, 1.013, 1.015],
    [1.015, 1.017, 1.014, 1.016],
    [1.016, 1.018, 1.015, 1.017],
    [1.017, 1.018, 1.014, 1.015],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Falling Three Methods (5 candles)
    [1.015, 1.016, 1.01, 1.011],
    [1.011, 1.012, 1.01, 1.0115],
    [1.0115, 1.0125, 1.011, 1.012],
    [1.012, 1.013, 1.0115, 1.0125],
    [1.0125, 1.013, 1.008, 1.009],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Unique Three River Top (3 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.014, 1.016, 1.013, 1.015],
    [1.015, 1.0155, 1.014, 1.0145],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Stick Sandwich (3 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.014, 1.0145, 1.0135, 1.014],
    [1.014, 1.0145, 1.009, 1.01],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Homing Pigeon (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.013, 1.014, 1.012, 1.013],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Matching High (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.014, 1.015, 1.013, 1.014],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Tri-Star (3 candles)
    [1.014, 1.0145, 1.0135, 1.014],
    [1.015, 1.0155, 1.0145, 1.015],
    [1.014, 1.0145, 1.0135, 1.014],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Tweezers Top (2 candles)
    [1.01, 1.015, 1.009, 1.014],
    [1.014, 1.015, 1.013, 1.0135],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Gravestone Doji (1 candle)
    [1.01, 1.015, 1.01, 1.01],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Long-Legged Doji (1 candle)
    [1.01, 1.015, 1.005, 1.01],
    [1.02, 1.02, 1.02, 1.02],
    // Bearish Spinning Top (1 candle)
    [1.01, 1.012, 1.008, 1.0095],
    [1.02, 1.02, 1.02, 1.02],
];

/// Generates `count` daily candles from the built-in pattern set.
///
/// Counts above the pattern length repeat the prices cyclically; timestamps
/// keep advancing one day per candle.
#[derive(Debug, Clone, Copy)]
pub struct SampleData {
    pub count: usize,
}

impl SampleData {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn candles(&self) -> Vec<Candle> {
        (0..self.count)
            .map(|i| {
                let [open, high, low, close] = PATTERNS[i % PATTERNS.len()];
                let timestamp = SAMPLE_BASE_TIMESTAMP + i as f64 * SAMPLE_INTERVAL;
                Candle::new(timestamp, open, high, low, close)
            })
            .collect()
    }
}

impl Default for SampleData {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_COUNT)
    }
}

impl DataSource for SampleData {
    fn load(&self) -> anyhow::Result<Vec<Candle>> {
        Ok(self.candles())
    }

    fn describe(&self) -> String {
        format!("built-in sample data ({} candles)", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        let candles = SampleData::default().load().unwrap();
        assert_eq!(candles.len(), 102);
    }

    #[test]
    fn test_prefix_when_fewer_requested() {
        let candles = SampleData::new(3).candles();
        assert_eq!(candles.len(), 3);
        assert!(candles[0].is_bullish());
        assert!(!candles[1].is_bullish());
        // Flat separator
        assert_eq!(candles[2].high, candles[2].low);
    }

    #[test]
    fn test_cycles_prices() {
        let candles = SampleData::new(250).candles();
        assert_eq!(candles.len(), 250);
        assert_eq!(candles[102].open, candles[0].open);
        assert_eq!(candles[102].close, candles[0].close);
        assert_eq!(candles[249].high, candles[249 - 204].high);
    }

    #[test]
    fn test_timestamps_daily() {
        let candles = SampleData::new(150).candles();
        assert_eq!(candles[0].timestamp, SAMPLE_BASE_TIMESTAMP);
        for pair in candles.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, SAMPLE_INTERVAL);
        }
    }

    #[test]
    fn test_zero_count() {
        assert!(SampleData::new(0).candles().is_empty());
    }
}
