// Moving Average Convergence/Divergence (MACD) indicator implementation
use super::moving_average::{moving_average, MovingAverageKind};
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_FAST: usize = 12;

/// Slow and fast exponential averages plus their difference, all aligned with the prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    pub slow: Vec<f64>,
    pub fast: Vec<f64>,
    pub divergence: Vec<f64>,
}

pub fn moving_average_convergence(prices: &[f64], nslow: usize, nfast: usize) -> Result<MacdSeries, EngineError> {
    let slow = moving_average(prices, nslow, MovingAverageKind::Exponential)?;
    let fast = moving_average(prices, nfast, MovingAverageKind::Exponential)?;
    let divergence = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    Ok(MacdSeries { slow, fast, divergence })
}

/// Reports the divergence line.
pub struct Macd {
    name: String,
    slow: usize,
    fast: usize,
}

impl Macd {
    pub fn new(slow: usize, fast: usize) -> Self {
        Self {
            name: format!("MACD({},{})", slow, fast),
            slow,
            fast,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(DEFAULT_MACD_SLOW, DEFAULT_MACD_FAST)
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "slow": self.slow, "fast": self.fast })
    }

    fn calculate(&self, data: &[f64]) -> Result<Vec<f64>, EngineError> {
        moving_average_convergence(data, self.slow, self.fast).map(|macd| macd.divergence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_prices() -> Vec<f64> {
        (0..60).map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.3).sin()).collect()
    }

    #[test]
    fn test_divergence_is_fast_minus_slow() {
        let macd = moving_average_convergence(&trending_prices(), 26, 12).unwrap();
        assert_eq!(macd.slow.len(), 60);
        assert_eq!(macd.fast.len(), 60);
        for i in 0..60 {
            assert_eq!(macd.divergence[i], macd.fast[i] - macd.slow[i]);
        }
    }

    #[test]
    fn test_components_match_exponential_averages() {
        let prices = trending_prices();
        let macd = moving_average_convergence(&prices, 6, 3).unwrap();
        assert_eq!(macd.slow, moving_average(&prices, 6, MovingAverageKind::Exponential).unwrap());
        assert_eq!(macd.fast, moving_average(&prices, 3, MovingAverageKind::Exponential).unwrap());
    }

    #[test]
    fn test_divergence_inherits_bootstrap() {
        let macd = moving_average_convergence(&trending_prices(), 26, 12).unwrap();
        // fast is flat up to 12, slow up to 26: the divergence is flat only over the shorter span
        assert!(macd.divergence[..12].iter().all(|v| *v == macd.divergence[0]));
    }

    #[test]
    fn test_macd_calculator_returns_divergence() {
        let prices = trending_prices();
        let macd = Macd::default();
        assert_eq!(macd.name(), "MACD(26,12)");
        let values = macd.calculate(&prices).unwrap();
        assert_eq!(values, moving_average_convergence(&prices, 26, 12).unwrap().divergence);
    }

    #[test]
    fn test_macd_too_short() {
        let result = moving_average_convergence(&[1.0; 20], 26, 12);
        assert!(matches!(result, Err(EngineError::ShapeMismatch { .. })));
    }
}
