// Analytics settings, loaded from a JSON file or built from defaults
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::indicators::macd::{DEFAULT_MACD_FAST, DEFAULT_MACD_SLOW};
use crate::indicators::rsi::DEFAULT_RSI_PERIODS;
use crate::performance::TRADING_DAYS_PER_YEAR;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Window for `sma`/`ema` requests that do not name one.
    pub ma_periods: usize,
    pub rsi_periods: usize,
    pub macd_slow: usize,
    pub macd_fast: usize,
    pub trading_periods_per_year: f64,
    /// Annual risk-free rate subtracted in the annualized Sharpe ratio.
    pub risk_free: f64,
    pub csv: CsvSettings,
}

/// Layout of price files read by the data layer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CsvSettings {
    pub delimiter: char,
    pub date_format: String,
    pub date_column: String,
    pub open_column: String,
    pub high_column: String,
    pub low_column: String,
    pub close_column: String,
    pub volume_column: String,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            ma_periods: 20,
            rsi_periods: DEFAULT_RSI_PERIODS,
            macd_slow: DEFAULT_MACD_SLOW,
            macd_fast: DEFAULT_MACD_FAST,
            trading_periods_per_year: TRADING_DAYS_PER_YEAR,
            risk_free: 0.0,
            csv: CsvSettings::default(),
        }
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings {
            delimiter: ',',
            date_format: "%Y-%m-%d".to_string(),
            date_column: "Date".to_string(),
            open_column: "Open".to_string(),
            high_column: "High".to_string(),
            low_column: "Low".to_string(),
            close_column: "Close".to_string(),
            volume_column: "Volume".to_string(),
        }
    }
}

impl AnalyticsSettings {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let settings: AnalyticsSettings =
            serde_json::from_str(json).map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "Loading analytics settings");
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("ma_periods", self.ma_periods),
            ("rsi_periods", self.rsi_periods),
            ("macd_slow", self.macd_slow),
            ("macd_fast", self.macd_fast),
        ] {
            if value == 0 {
                return Err(EngineError::ConfigError(format!("{} must be greater than 0", name)));
            }
        }
        if self.trading_periods_per_year.is_nan() || self.trading_periods_per_year <= 0.0 {
            return Err(EngineError::ConfigError(
                "trading_periods_per_year must be positive".to_string(),
            ));
        }
        if !self.csv.delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "CSV delimiter '{}' is not a single-byte character",
                self.csv.delimiter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = AnalyticsSettings::default();
        assert_eq!(settings.ma_periods, 20);
        assert_eq!(settings.rsi_periods, 14);
        assert_eq!(settings.macd_slow, 26);
        assert_eq!(settings.macd_fast, 12);
        assert_eq!(settings.trading_periods_per_year, 252.0);
        assert_eq!(settings.csv.delimiter, ',');
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = AnalyticsSettings::from_json_str(r#"{ "rsi_periods": 9, "csv": { "delimiter": ";" } }"#).unwrap();
        assert_eq!(settings.rsi_periods, 9);
        assert_eq!(settings.macd_slow, 26);
        assert_eq!(settings.csv.delimiter, ';');
        assert_eq!(settings.csv.close_column, "Close");
    }

    #[test]
    fn test_invalid_settings() {
        let zero = AnalyticsSettings::from_json_str(r#"{ "macd_fast": 0 }"#);
        assert!(matches!(zero, Err(EngineError::ConfigError(ref msg)) if msg.contains("macd_fast")));

        let malformed = AnalyticsSettings::from_json_str("{ not json");
        assert!(matches!(malformed, Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "risk_free": 0.02, "trading_periods_per_year": 365 }}"#).unwrap();
        let settings = AnalyticsSettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.risk_free, 0.02);
        assert_eq!(settings.trading_periods_per_year, 365.0);

        let missing = AnalyticsSettings::load_from_file("/nonexistent/settings.json");
        assert!(matches!(missing, Err(EngineError::ConfigError(_))));
    }
}
