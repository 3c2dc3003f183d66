// Simple Moving Average (SMA) indicator implementation
use super::moving_average::{moving_average, MovingAverageKind};
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[f64]) -> Result<Vec<f64>, EngineError> {
        moving_average(data, self.period, MovingAverageKind::Simple)
    }
}
