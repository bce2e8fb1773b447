//! Price bounds of a candle sequence.

use crate::Candle;

/// Lowest low and highest high over a candle sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f32,
    pub max: f32,
}

impl PriceRange {
    /// Compute the range from candles. Returns `None` for an empty slice.
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        if candles.is_empty() {
            return None;
        }

        let (min, max) = candles
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), c| {
                (min.min(c.low), max.max(c.high))
            });

        Some(Self { min, max })
    }

    /// Distance between the bounds.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true when every price in the sequence is the same.
    pub fn is_flat(&self) -> bool {
        self.span() <= 0.0
    }

    /// Map a price into `[0, height]`.
    ///
    /// A flat range has no extent to divide by, so every price maps to the
    /// middle of the target height.
    pub fn normalize(&self, price: f32, height: f32) -> f32 {
        if self.is_flat() {
            return height * 0.5;
        }
        (price - self.min) / self.span() * height
    }
}
