// Relative Strength Index (RSI) indicator implementation
use super::IndicatorCalculator;
use crate::error::{ensure_positive, EngineError};
use serde_json::Value;

pub const DEFAULT_RSI_PERIODS: usize = 14;

/// Average gain and loss carried from one bar to the next.
#[derive(Debug, Clone, Copy)]
struct Smoothing {
    up: f64,
    down: f64,
}

impl Smoothing {
    fn seed(deltas: &[f64], periods: usize) -> Self {
        let up: f64 = deltas.iter().filter(|d| **d >= 0.0).sum();
        let down: f64 = -deltas.iter().filter(|d| **d < 0.0).sum::<f64>();
        Self {
            up: up / periods as f64,
            down: down / periods as f64,
        }
    }

    fn update(&mut self, delta: f64, periods: usize) {
        let (upval, downval) = if delta > 0.0 { (delta, 0.0) } else { (0.0, -delta) };
        let n = periods as f64;
        self.up = (self.up * (n - 1.0) + upval) / n;
        self.down = (self.down * (n - 1.0) + downval) / n;
    }

    // No losses in the window saturates the oscillator at 100.
    fn rsi(&self) -> f64 {
        if self.down == 0.0 {
            return 100.0;
        }
        let ratio = self.up / self.down;
        100.0 - 100.0 / (1.0 + ratio)
    }
}

/// Wilder-smoothed relative strength over `periods` price changes.
///
/// The seed value (averages of the first `periods` changes) fills the first
/// `periods` positions; every later position applies one smoothing step to
/// the change ending one bar earlier.
pub fn relative_strength(prices: &[f64], periods: usize) -> Result<Vec<f64>, EngineError> {
    ensure_positive("periods", periods)?;
    if prices.len() <= periods {
        return Err(EngineError::shape("relative_strength", periods.saturating_add(1), prices.len()));
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let mut state = Smoothing::seed(&deltas[..periods], periods);
    if state.down == 0.0 {
        tracing::debug!(periods, "RSI seed window has no losses, saturating at 100");
    }

    let mut rsi = vec![state.rsi(); prices.len()];
    for i in periods..prices.len() {
        state.update(deltas[i - 1], periods);
        rsi[i] = state.rsi();
    }
    Ok(rsi)
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(DEFAULT_RSI_PERIODS)
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[f64]) -> Result<Vec<f64>, EngineError> {
        relative_strength(data, self.period)
    }
}
