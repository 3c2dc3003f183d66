use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::Candle;
use shared::utils::fill_gaps;

use crate::config::CsvSettings;
use crate::error::EngineError;

// Parses "2024-01-31" style dates as well as full date-times, depending on the format.
pub fn parse_timestamp(s: &str, format: &str) -> Result<DateTime<Utc>, EngineError> {
    let s = s.trim();
    let naive = match NaiveDateTime::parse_from_str(s, format) {
        Ok(dt) => dt,
        Err(_) => NaiveDate::parse_from_str(s, format)
            .map_err(|e| EngineError::CsvDataFormatError(format!("Failed to parse date '{}': {}", s, e)))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EngineError::CsvDataFormatError(format!("Invalid midnight for date '{}'", s)))?,
    };
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

// Empty cells and the usual "missing" markers become gaps to be filled later.
pub fn parse_value(s: &str) -> Result<Option<f64>, EngineError> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    let value = s
        .parse::<f64>()
        .map_err(|e| EngineError::CsvDataFormatError(format!("Failed to parse number '{}': {}", s, e)))?;
    Ok(Some(value).filter(|v| v.is_finite()))
}

struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord, settings: &CsvSettings) -> Result<Self, EngineError> {
        let find = |name: &str| headers.iter().position(|header| header == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' column in CSV header", name)))
        };
        Ok(Columns {
            date: require(settings.date_column.as_str())?,
            open: require(settings.open_column.as_str())?,
            high: require(settings.high_column.as_str())?,
            low: require(settings.low_column.as_str())?,
            close: require(settings.close_column.as_str())?,
            volume: find(settings.volume_column.as_str()),
        })
    }
}

struct RawRow {
    timestamp: DateTime<Utc>,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

pub struct PriceCsvParser;

impl PriceCsvParser {
    // Header (default names): Date,Open,High,Low,Close,Volume
    // Example Row: 2024-01-02,187.15,188.44,183.89,185.64,82488700
    pub fn load_candles_from_csv<P: AsRef<Path>>(file_path: P, settings: &CsvSettings) -> Result<Vec<Candle>, EngineError> {
        let path = file_path.as_ref();
        let file = File::open(path)?;
        tracing::info!(path = %path.display(), "Loading candles from CSV");
        Self::read_candles(BufReader::new(file), settings)
    }

    /// Reads candles from any CSV source, sorted by timestamp with gaps
    /// forward-filled and then back-filled column by column.
    pub fn read_candles<R: Read>(reader: R, settings: &CsvSettings) -> Result<Vec<Candle>, EngineError> {
        let delimiter = u8::try_from(settings.delimiter)
            .map_err(|_| EngineError::ConfigError(format!("CSV delimiter '{}' is not a single byte", settings.delimiter)))?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = Columns::locate(&headers, settings)?;

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;
            let field = |pos: usize, name: &str| -> Result<Option<f64>, EngineError> {
                parse_value(record.get(pos).unwrap_or(""))
                    .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e)))
            };

            let date_str = record
                .get(columns.date)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' field at line {}", settings.date_column, line)))?;
            let timestamp = parse_timestamp(date_str, &settings.date_format)
                .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing datetime at line {}: {}", line, e)))?;

            rows.push(RawRow {
                timestamp,
                open: field(columns.open, settings.open_column.as_str())?,
                high: field(columns.high, settings.high_column.as_str())?,
                low: field(columns.low, settings.low_column.as_str())?,
                close: field(columns.close, settings.close_column.as_str())?,
                volume: match columns.volume {
                    Some(pos) => field(pos, settings.volume_column.as_str())?,
                    None => Some(0.0),
                },
            });
        }

        let read = rows.len();
        rows.sort_by_key(|r| r.timestamp);
        rows.dedup_by_key(|r| r.timestamp);
        if rows.len() != read {
            tracing::warn!(dropped = read - rows.len(), "Dropped CSV rows with duplicate timestamps");
        }

        let fill = |values: Vec<Option<f64>>, name: &str| {
            fill_gaps(&values).ok_or_else(|| EngineError::CsvDataFormatError(format!("Column '{}' has no values", name)))
        };
        let opens = fill(rows.iter().map(|r| r.open).collect(), settings.open_column.as_str())?;
        let highs = fill(rows.iter().map(|r| r.high).collect(), settings.high_column.as_str())?;
        let lows = fill(rows.iter().map(|r| r.low).collect(), settings.low_column.as_str())?;
        let closes = fill(rows.iter().map(|r| r.close).collect(), settings.close_column.as_str())?;
        let volumes = fill(rows.iter().map(|r| r.volume).collect(), settings.volume_column.as_str())?;

        let candles = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Candle {
                timestamp: row.timestamp,
                open: opens[i],
                high: highs[i],
                low: lows[i],
                close: closes[i],
                volume: volumes[i],
            })
            .collect::<Vec<_>>();
        tracing::debug!(candles = candles.len(), "Parsed candles");
        Ok(candles)
    }
}
