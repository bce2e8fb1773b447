//! Core types for the candlescape application.
//!
//! This crate provides fundamental data structures with no external dependencies:
//! - `Candle` - OHLC candle data
//! - `PriceRange` - Price bounds of a candle sequence and their normalization

pub mod candle;
pub mod range;

pub use candle::Candle;
pub use range::PriceRange;
