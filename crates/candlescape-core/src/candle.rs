//! Candle data structures for OHLC data.

/// OHLC candle (CPU side).
///
/// Candles are identified by their position in a sequence, not by timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
}

impl Candle {
    pub fn new(timestamp: f64, open: f32, high: f32, low: f32, close: f32) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns true when the close is strictly above the open.
    ///
    /// An unchanged candle (`close == open`) is not bullish.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Upper edge of the body.
    pub fn body_top(&self) -> f32 {
        self.open.max(self.close)
    }

    /// Lower edge of the body.
    pub fn body_bottom(&self) -> f32 {
        self.open.min(self.close)
    }

    /// Checks that all prices are finite and that the wicks enclose the body.
    pub fn is_consistent(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.low <= self.body_bottom()
            && self.high >= self.body_top()
    }
}
