// Handler building a performance summary of one price series
use serde::Serialize;
use shared::models::PriceSeries;

use crate::config::AnalyticsSettings;
use crate::error::EngineError;
use crate::indicators::{moving_average_convergence, relative_strength};
use crate::performance::stats::mean;
use crate::performance::{
    annualized_returns, annualized_sharpe_ratio, cc_annualize_returns, daily_returns, point_to_point_return,
    sharpe_ratio, ReturnType,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub observations: usize,
    /// Net return from the first to the last observation.
    pub total_return: f64,
    pub average_daily_return: f64,
    pub annualized_return: f64,
    /// `ln(1 + annualized_return)`.
    pub cc_annualized_return: f64,
    pub sharpe_ratio: f64,
    pub annualized_sharpe: f64,
    pub rsi_last: f64,
    pub macd_divergence_last: f64,
}

pub fn handle_summarize(prices: &PriceSeries, settings: &AnalyticsSettings) -> Result<PerformanceSummary, EngineError> {
    let first = prices
        .first_timestamp()
        .ok_or_else(|| EngineError::shape("summarize", 2, 0))?;
    let total_return = point_to_point_return(prices, first, None, ReturnType::Net)?;

    let daily = daily_returns(prices)?;
    let average_daily_return = mean(daily.values()).ok_or_else(|| EngineError::shape("summarize", 2, prices.len()))?;
    let periods_per_year = settings.trading_periods_per_year;

    // Both outputs are as long as `prices`, which the checks above make non-empty.
    let rsi = relative_strength(prices.values(), settings.rsi_periods)?;
    let macd = moving_average_convergence(prices.values(), settings.macd_slow, settings.macd_fast)?;

    let summary = PerformanceSummary {
        observations: prices.len(),
        total_return,
        average_daily_return,
        annualized_return: annualized_returns(average_daily_return, periods_per_year),
        cc_annualized_return: cc_annualize_returns(average_daily_return, periods_per_year)?,
        sharpe_ratio: sharpe_ratio(prices)?,
        annualized_sharpe: annualized_sharpe_ratio(daily.values(), settings.risk_free, periods_per_year)?,
        rsi_last: rsi[rsi.len() - 1],
        macd_divergence_last: macd.divergence[macd.divergence.len() - 1],
    };
    tracing::info!(
        observations = summary.observations,
        total_return = summary.total_return,
        sharpe_ratio = summary.sharpe_ratio,
        "Built performance summary"
    );
    Ok(summary)
}
