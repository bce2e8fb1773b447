//! Data source trait definition.

use candlescape_core::Candle;

/// Trait for types that can load candle data.
///
/// This trait uses `anyhow::Result` for flexible error handling.
pub trait DataSource {
    fn load(&self) -> anyhow::Result<Vec<Candle>>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Count candles whose wicks do not enclose the body or whose prices are not finite.
///
/// Such candles are still rendered; the count is only reported.
pub fn count_inconsistent(candles: &[Candle]) -> usize {
    candles.iter().filter(|c| !c.is_consistent()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_inconsistent() {
        let candles = [
            Candle::new(0.0, 1.0, 1.1, 0.9, 1.05),
            Candle::new(1.0, 1.0, 1.02, 0.9, 1.05),
            Candle::new(2.0, 1.0, 1.1, 1.01, 1.05),
        ];
        assert_eq!(count_inconsistent(&candles), 2);
        assert_eq!(count_inconsistent(&[]), 0);
    }
}
