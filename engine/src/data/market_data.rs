// Reshapes candle data into the plain series the analytics operate on
use std::str::FromStr;

use chrono::{DateTime, Utc};
use shared::models::{Candle, PriceSeries, ReturnSeries};
use shared::utils::fill_gaps;

use crate::error::EngineError;
use crate::performance::daily_returns;

/// Candle field selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceField {
    Open,
    High,
    Low,
    #[default]
    Close,
    Volume,
}

impl PriceField {
    pub fn extract(&self, candle: &Candle) -> f64 {
        match self {
            PriceField::Open => candle.open,
            PriceField::High => candle.high,
            PriceField::Low => candle.low,
            PriceField::Close => candle.close,
            PriceField::Volume => candle.volume,
        }
    }
}

impl FromStr for PriceField {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(PriceField::Open),
            "high" => Ok(PriceField::High),
            "low" => Ok(PriceField::Low),
            "close" => Ok(PriceField::Close),
            "volume" => Ok(PriceField::Volume),
            other => Err(EngineError::InvalidParameter(format!("Unknown price field: {}", other))),
        }
    }
}

/// One field of every candle as a series indexed by the candle timestamps.
pub fn field_series(candles: &[Candle], field: PriceField) -> Result<PriceSeries, EngineError> {
    Ok(PriceSeries::from_points(
        candles.iter().map(|c| (c.timestamp, field.extract(c))),
    )?)
}

/// Builds a gap-free series from raw observations: gaps are forward-filled,
/// then a leading gap is back-filled.
pub fn series_from_observations(observations: &[(DateTime<Utc>, Option<f64>)]) -> Result<PriceSeries, EngineError> {
    let raw: Vec<Option<f64>> = observations.iter().map(|(_, v)| *v).collect();
    let values = fill_gaps(&raw)
        .ok_or_else(|| EngineError::InvalidParameter("Series has no observed values".to_string()))?;
    let index = observations.iter().map(|(ts, _)| *ts).collect();
    Ok(PriceSeries::new(index, values)?)
}

/// Daily net returns of one candle field, the frame fed to portfolio tooling.
pub fn panel_to_returns(candles: &[Candle], field: PriceField) -> Result<ReturnSeries, EngineError> {
    daily_returns(&field_series(candles, field)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn candle(n: i64, close: f64) -> Candle {
        Candle {
            timestamp: day(n),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000.0 * n as f64,
        }
    }

    #[test]
    fn test_field_series() {
        let candles = vec![candle(0, 10.0), candle(1, 12.0)];
        assert_eq!(field_series(&candles, PriceField::Close).unwrap().values(), &[10.0, 12.0]);
        assert_eq!(field_series(&candles, PriceField::High).unwrap().values(), &[12.0, 14.0]);
        assert_eq!(field_series(&candles, "volume".parse().unwrap()).unwrap().values(), &[0.0, 1_000.0]);
    }

    #[test]
    fn test_field_series_rejects_unordered_candles() {
        let candles = vec![candle(1, 10.0), candle(0, 12.0)];
        assert!(matches!(field_series(&candles, PriceField::Close), Err(EngineError::AnyhowError(_))));
    }

    #[test]
    fn test_series_from_observations_fills_gaps() {
        let observations = vec![(day(0), None), (day(1), Some(5.0)), (day(2), None), (day(3), Some(7.0))];
        let series = series_from_observations(&observations).unwrap();
        assert_eq!(series.values(), &[5.0, 5.0, 5.0, 7.0]);

        let empty = series_from_observations(&[(day(0), None)]);
        assert!(matches!(empty, Err(EngineError::InvalidParameter(_))));
    }

    #[test]
    fn test_panel_to_returns() {
        let candles = vec![candle(0, 100.0), candle(1, 110.0), candle(2, 99.0)];
        let rets = panel_to_returns(&candles, PriceField::Close).unwrap();
        assert_eq!(rets.index(), &[day(1), day(2)]);
        assert!((rets.values()[0] - 0.1).abs() < 1e-9);
        assert!((rets.values()[1] + 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_field() {
        assert!("adjclose".parse::<PriceField>().is_err());
    }
}
