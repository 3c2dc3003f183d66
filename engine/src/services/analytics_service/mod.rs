// engine/src/services/analytics_service/mod.rs
// AnalyticsService holds the settings and dispatches each request to its handler module.
use std::path::Path;

use shared::models::{Indicator, PriceSeries};

use crate::config::AnalyticsSettings;
use crate::data::{field_series, PriceCsvParser, PriceField};
use crate::error::EngineError;

pub mod calculate_indicator;
pub mod summarize;

pub use summarize::PerformanceSummary;

#[derive(Debug, Clone, Default)]
pub struct AnalyticsService {
    settings: AnalyticsSettings,
}

impl AnalyticsService {
    pub fn new(settings: AnalyticsSettings) -> Self {
        AnalyticsService { settings }
    }

    /// Loads one field of a CSV price file using the configured layout.
    pub fn load_prices<P: AsRef<Path>>(&self, path: P, field: PriceField) -> Result<PriceSeries, EngineError> {
        let candles = PriceCsvParser::load_candles_from_csv(path, &self.settings.csv)?;
        field_series(&candles, field)
    }

    pub fn calculate_indicator(
        &self,
        indicator_type: &str,
        parameters: &str,
        prices: &PriceSeries,
    ) -> Result<Indicator, EngineError> {
        tracing::info!(indicator_type, parameters, "Received indicator request, dispatching to handler.");
        calculate_indicator::handle_calculate_indicator(indicator_type, parameters, prices, &self.settings)
    }

    pub fn summarize(&self, prices: &PriceSeries) -> Result<PerformanceSummary, EngineError> {
        tracing::info!(observations = prices.len(), "Received summary request, dispatching to handler.");
        summarize::handle_summarize(prices, &self.settings)
    }
}
