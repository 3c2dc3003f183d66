// Exponential Moving Average (EMA) indicator implementation
use super::moving_average::{moving_average, MovingAverageKind};
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;

/// Exponentially weighted average over a fixed `period`-sample window.
///
/// Uses a fixed decay kernel rather than the recursive `alpha` update, so the
/// output only depends on the last `period` prices.
pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[f64]) -> Result<Vec<f64>, EngineError> {
        moving_average(data, self.period, MovingAverageKind::Exponential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::moving_average::weights;

    #[test]
    fn test_ema_calculation() {
        let ema = Ema::new(3);
        let data = [10.0, 11.0, 12.0, 13.0, 14.0];
        let results = ema.calculate(&data).unwrap();
        let w = weights(3, MovingAverageKind::Exponential);

        let at_three = w[0] * 13.0 + w[1] * 12.0 + w[2] * 11.0;
        let at_four = w[0] * 14.0 + w[1] * 13.0 + w[2] * 12.0;
        assert_eq!(results.len(), 5);
        for value in &results[..3] {
            assert!((value - at_three).abs() < 1e-9);
        }
        assert!((results[3] - at_three).abs() < 1e-9);
        assert!((results[4] - at_four).abs() < 1e-9);
    }

    #[test]
    fn test_ema_kernel_increases_across_window() {
        // The oldest sample in the window carries the largest weight.
        let w = weights(5, MovingAverageKind::Exponential);
        assert!(w.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_ema_insufficient_data() {
        let result = Ema::new(5).calculate(&[1.0; 5]);
        assert!(matches!(result, Err(EngineError::ShapeMismatch { required: 6, actual: 5, .. })));
    }
}
