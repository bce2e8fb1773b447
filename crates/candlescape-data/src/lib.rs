//! Data loading utilities for candlescape.

pub mod csv;
pub mod sample;
pub mod source;

pub use self::csv::CsvLoader;
pub use sample::{SampleData, DEFAULT_SAMPLE_COUNT};
pub use source::{count_inconsistent, DataSource};
