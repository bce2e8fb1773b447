//! CSV data loading implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use candlescape_core::Candle;

use crate::DataSource;

/// Loads candle data from CSV files.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvLoader {
    fn load(&self) -> anyhow::Result<Vec<Candle>> {
        load_candles_from_csv(&self.path)
            .with_context(|| format!("Failed to load candles from {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Parse "YYYY-MM-DD HH:MM:SS" (or with a `T` separator) or a Unix timestamp
/// to Unix seconds.
pub fn parse_datetime(s: &str) -> Option<f64> {
    let s = s.trim();

    // Plain Unix timestamp (e.g., "1325412060.0")
    if let Ok(ts) = s.parse::<f64>() {
        return ts.is_finite().then_some(ts);
    }

    let parts: Vec<&str> = s
        .trim_end_matches('Z')
        .split(['-', ' ', ':', 'T'])
        .collect();
    if parts.len() < 6 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    let hour: u32 = parts[3].parse().ok()?;
    let min: u32 = parts[4].parse().ok()?;
    let sec: f64 = parts[5].parse().ok()?;

    if year < 1970 || !(1..=12).contains(&month) || day == 0 || day > 31 {
        return None;
    }

    // Days since Unix epoch (1970-01-01), ignoring leap seconds.
    let mut days: i64 = (1970..year)
        .map(|y| if is_leap_year(y) { 366 } else { 365 })
        .sum();
    let month_days = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    days += month_days[month as usize - 1] as i64;
    if month > 2 && is_leap_year(year) {
        days += 1;
    }
    days += (day - 1) as i64;

    let seconds = days * 86400 + hour as i64 * 3600 + min as i64 * 60;
    Some(seconds as f64 + sec)
}

/// Load candles from a CSV file with a header row.
///
/// Columns are located by header name (`timestamp`/`time`/`date`, `open`,
/// `high`, `low`, `close`, case-insensitive) and default to positions 0..=4.
/// Extra columns such as volume or symbol are ignored. Millisecond timestamps
/// are converted to seconds and the result is sorted chronologically.
pub fn load_candles_from_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Candle>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(::csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let headers_lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let find = |names: &[&str]| headers_lower.iter().position(|h| names.contains(&h.as_str()));

    let ts_col = headers_lower
        .iter()
        .position(|h| h.contains("timestamp"))
        .or_else(|| find(&["time", "date", "datetime"]))
        .unwrap_or(0);
    let open_col = find(&["open", "o"]).unwrap_or(1);
    let high_col = find(&["high", "h"]).unwrap_or(2);
    let low_col = find(&["low", "l"]).unwrap_or(3);
    let close_col = find(&["close", "c"]).unwrap_or(4);

    let mut candles = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let line = row + 2; // header is line 1

        let field = |col: usize, name: &str| -> anyhow::Result<f32> {
            let raw = record
                .get(col)
                .with_context(|| format!("line {line}: missing {name} column"))?;
            let value = raw
                .parse::<f32>()
                .with_context(|| format!("line {line}: invalid {name} value {raw:?}"))?;
            anyhow::ensure!(value.is_finite(), "line {line}: non-finite {name} value {raw:?}");
            Ok(value)
        };

        let raw_ts = record.get(ts_col).unwrap_or("");
        let mut timestamp = parse_datetime(raw_ts)
            .with_context(|| format!("line {line}: invalid timestamp {raw_ts:?}"))?;

        // Detect milliseconds (13+ digits) vs seconds (10 digits)
        if timestamp > 1e12 {
            timestamp /= 1000.0;
        }

        candles.push(Candle::new(
            timestamp,
            field(open_col, "open")?,
            field(high_col, "high")?,
            field(low_col, "low")?,
            field(close_col, "close")?,
        ));
    }

    // Sort by timestamp to ensure chronological order
    candles.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let timestamps: Vec<f64> = candles.iter().map(|c| c.timestamp).collect();
    if let Some(report) = GapReport::analyze(&timestamps) {
        report.log();
    }

    Ok(candles)
}

/// Summary of missing bars in a timestamp sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct GapReport {
    pub points: usize,
    /// Most common spacing between consecutive timestamps, in seconds.
    pub expected_interval: i64,
    pub gaps: usize,
    pub missing: i64,
    pub largest_gap: i64,
}

impl GapReport {
    /// Returns `None` when there are fewer than two points.
    pub fn analyze(timestamps: &[f64]) -> Option<Self> {
        if timestamps.len() < 2 {
            return None;
        }

        let mut sorted = timestamps.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut intervals: HashMap<i64, usize> = HashMap::new();
        for window in sorted.windows(2) {
            let diff = (window[1] - window[0]).round() as i64;
            *intervals.entry(diff).or_insert(0) += 1;
        }

        // Ties resolve to the smaller interval so the result is deterministic.
        let expected_interval = intervals
            .iter()
            .filter(|(interval, _)| **interval > 0)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(interval, _)| *interval)
            .unwrap_or(60);

        let mut gaps = 0;
        let mut missing = 0;
        let mut largest_gap = 0i64;
        for window in sorted.windows(2) {
            let diff = (window[1] - window[0]).round() as i64;
            if diff > expected_interval {
                gaps += 1;
                missing += diff / expected_interval - 1;
                largest_gap = largest_gap.max(diff);
            }
        }

        Some(Self {
            points: timestamps.len(),
            expected_interval,
            gaps,
            missing,
            largest_gap,
        })
    }

    pub fn log(&self) {
        if self.gaps == 0 {
            log::debug!(
                "{} candles, {}s interval, no gaps",
                self.points,
                self.expected_interval
            );
        } else {
            log::info!(
                "{} candles, {}s interval: {} gaps, {} missing bars, largest gap {}s",
                self.points,
                self.expected_interval,
                self.gaps,
                self.missing,
                self.largest_gap
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_unix_timestamp() {
        assert_eq!(parse_datetime("1325412060.0"), Some(1325412060.0));
        assert_eq!(parse_datetime(" 1700000000 "), Some(1700000000.0));
    }

    #[test]
    fn test_parse_date_string() {
        assert_eq!(parse_datetime("1970-01-01 00:00:00"), Some(0.0));
        assert_eq!(parse_datetime("2025-02-23 09:00:00"), Some(1740301200.0));
        assert_eq!(parse_datetime("2024-03-01T00:00:00Z"), Some(1709251200.0));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime("inf"), None);
        assert_eq!(parse_datetime("NaN"), None);
        assert_eq!(parse_datetime("2025-13-01 00:00:00"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn test_load_with_headers() {
        let file = write_csv(
            "Timestamp,Open,High,Low,Close,Volume\n\
             1700000060,1.04,1.06,0.90,0.91,10\n\
             1700000000,1.00,1.05,0.95,1.04,12\n",
        );
        let candles = CsvLoader::new(file.path()).load().unwrap();
        assert_eq!(candles.len(), 2);
        // Sorted chronologically
        assert_eq!(candles[0].timestamp, 1700000000.0);
        assert_eq!(candles[0].open, 1.00);
        assert_eq!(candles[0].close, 1.04);
        assert_eq!(candles[1].low, 0.90);
    }

    #[test]
    fn test_load_reordered_columns_and_millis() {
        let file = write_csv(
            "unix,symbol,close,low,high,open\n\
             1700000000000,EURUSD,1.04,0.95,1.05,1.00\n",
        );
        // "unix" is not a known timestamp header, so column 0 is used.
        let candles = load_candles_from_csv(file.path()).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].timestamp, 1700000000.0);
        assert_eq!(candles[0].open, 1.00);
        assert_eq!(candles[0].high, 1.05);
        assert_eq!(candles[0].low, 0.95);
        assert_eq!(candles[0].close, 1.04);
    }

    #[test]
    fn test_load_date_strings() {
        let file = write_csv(
            "time,open,high,low,close\n\
             2025-02-23 09:00:00,1.01,1.015,1.009,1.014\n\
             2025-02-24 09:00:00,1.0145,1.016,1.005,1.006\n",
        );
        let candles = load_candles_from_csv(file.path()).unwrap();
        assert_eq!(candles[1].timestamp - candles[0].timestamp, 86400.0);
    }

    #[test]
    fn test_load_reports_bad_values() {
        let file = write_csv("timestamp,open,high,low,close\n0,1.0,abc,0.9,1.0\n");
        let err = load_candles_from_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("high"));
    }

    #[test]
    fn test_load_rejects_non_finite_prices() {
        let file = write_csv("timestamp,open,high,low,close\n0,1.0,inf,0.9,1.05\n");
        let err = load_candles_from_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("non-finite high"));

        let file = write_csv("timestamp,open,high,low,close\n60,1.0,1.1,0.9,NaN\n");
        let err = load_candles_from_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("non-finite close"));

        let file = write_csv("timestamp,open,high,low,close\n60,-inf,1.1,0.9,1.0\n");
        assert!(load_candles_from_csv(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let loader = CsvLoader::new("/nonexistent/candles.csv");
        assert!(loader.load().is_err());
        assert!(loader.describe().contains("candles.csv"));
    }

    #[test]
    fn test_gap_report() {
        let timestamps = [0.0, 60.0, 120.0, 300.0, 360.0];
        let report = GapReport::analyze(&timestamps).unwrap();
        assert_eq!(report.expected_interval, 60);
        assert_eq!(report.gaps, 1);
        assert_eq!(report.missing, 2);
        assert_eq!(report.largest_gap, 180);

        assert!(GapReport::analyze(&[1.0]).is_none());
    }
}
