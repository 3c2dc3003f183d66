// Handler for indicator requests addressed by name with JSON parameters
use serde_json::Value;
use shared::models::{Indicator, PriceSeries};

use crate::config::AnalyticsSettings;
use crate::error::EngineError;
use crate::indicators::{Ema, IndicatorCalculator, Macd, Rsi, Sma};

fn window(params: &Value, key: &str, default: usize) -> Result<usize, EngineError> {
    match params.get(key) {
        None => Ok(default),
        Some(v) => {
            let raw = v.as_u64().ok_or_else(|| {
                EngineError::InvalidParameter(format!("Parameter '{}' must be a non-negative integer, got {}", key, v))
            })?;
            usize::try_from(raw)
                .map_err(|_| EngineError::InvalidParameter(format!("Parameter '{}' is too large: {}", key, raw)))
        }
    }
}

pub fn handle_calculate_indicator(
    indicator_type: &str,
    parameters: &str,
    prices: &PriceSeries,
    settings: &AnalyticsSettings,
) -> Result<Indicator, EngineError> {
    tracing::debug!(indicator_type, parameters, observations = prices.len(), "Handling indicator request");

    let params: Value = if parameters.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(parameters).map_err(|e| {
            tracing::error!(indicator_type, parameters, error_detail = ?e, "Invalid JSON parameters for indicator");
            EngineError::InvalidParameter(format!("Invalid JSON parameters for indicator '{}': {}", indicator_type, e))
        })?
    };

    let indicator_calculator: Box<dyn IndicatorCalculator> = match indicator_type.to_lowercase().as_str() {
        "sma" => Box::new(Sma::new(window(&params, "period", settings.ma_periods)?)),
        "ema" => Box::new(Ema::new(window(&params, "period", settings.ma_periods)?)),
        "rsi" => Box::new(Rsi::new(window(&params, "period", settings.rsi_periods)?)),
        "macd" => Box::new(Macd::new(
            window(&params, "slow", settings.macd_slow)?,
            window(&params, "fast", settings.macd_fast)?,
        )),
        _ => {
            tracing::error!(indicator_type, "Unknown indicator type requested");
            return Err(EngineError::InvalidParameter(format!("Unknown indicator type: {}", indicator_type)));
        }
    };

    let values = indicator_calculator.calculate(prices.values())?;

    Ok(Indicator {
        name: indicator_calculator.name().to_string(),
        parameters: indicator_calculator.parameters(),
        values,
    })
}
