// Technical indicators module
pub mod ema;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod sma;

pub use ema::Ema;
pub use macd::{moving_average_convergence, Macd, MacdSeries};
pub use moving_average::{moving_average, MovingAverageKind};
pub use rsi::{relative_strength, Rsi};
pub use sma::Sma;

use crate::error::EngineError;
use serde_json::Value;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[f64]) -> Result<Vec<f64>, EngineError>; // Same length as `data`, warm-up flat-filled
}
