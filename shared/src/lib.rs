// Data models shared by the analytics engine and its callers.

pub mod models;
pub mod utils;

pub use models::{Candle, Indicator, PriceSeries, ReturnSeries, TimeSeries};
