// Risk-adjusted return metrics.
//
// Two Sharpe conventions live side by side: `sharpe_ratio` scales by the
// number of observations, `qstk_get_sharpe_ratio` by a 252-day year.
use shared::models::{Candle, PriceSeries, TimeSeries};

use super::returns::daily_returns;
use super::stats::{mean, population_std_dev, sample_std_dev};
use crate::error::EngineError;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

// Rounding leaves a residue of a few ulps in the deviation of a constant
// sequence; anything within this many epsilons of the mean's scale is zero.
const DEVIATION_ULPS: f64 = 16.0;

fn non_zero_deviation(std_dev: f64, mean_value: f64, count: usize, operation: &str) -> Result<f64, EngineError> {
    let tolerance = DEVIATION_ULPS * f64::EPSILON * mean_value.abs().max(1.0) * (count as f64).sqrt();
    if std_dev <= tolerance {
        return Err(EngineError::ArithmeticDomainError(format!(
            "{}: returns have zero standard deviation",
            operation
        )));
    }
    Ok(std_dev)
}

/// `mean / stdev * sqrt(N)` over the daily returns of `prices`, `N` being the
/// number of returns. Uses the sample standard deviation.
pub fn sharpe_ratio(prices: &PriceSeries) -> Result<f64, EngineError> {
    let rets = daily_returns(prices)?;
    let values = rets.values();
    let (m, sd) = match (mean(values), sample_std_dev(values)) {
        (Some(m), Some(sd)) => (m, sd),
        _ => return Err(EngineError::shape("sharpe_ratio", 3, prices.len())),
    };
    let sd = non_zero_deviation(sd, m, values.len(), "sharpe_ratio")?;
    Ok(m / sd * (values.len() as f64).sqrt())
}

/// `(mean * periods_per_year - risk_free) / (std * sqrt(periods_per_year))`
/// with the population standard deviation.
pub fn annualized_sharpe_ratio(returns: &[f64], risk_free: f64, periods_per_year: f64) -> Result<f64, EngineError> {
    let (m, sd) = match (mean(returns), population_std_dev(returns)) {
        (Some(m), Some(sd)) => (m, sd),
        _ => return Err(EngineError::shape("annualized_sharpe_ratio", 1, returns.len())),
    };
    let sd = non_zero_deviation(sd, m, returns.len(), "annualized_sharpe_ratio")?;
    Ok((m * periods_per_year - risk_free) / (sd * periods_per_year.sqrt()))
}

/// Sharpe ratio of daily `returns` annualized over 252 trading days.
pub fn qstk_get_sharpe_ratio(returns: &[f64], risk_free: f64) -> Result<f64, EngineError> {
    annualized_sharpe_ratio(returns, risk_free, TRADING_DAYS_PER_YEAR)
}

/// `high - low` for every candle.
///
/// `offset` is accepted for resampling every `offset` periods but no
/// resampling is applied yet; the spread is computed on every candle.
pub fn high_low_spread(candles: &[Candle], offset: Option<usize>) -> Result<TimeSeries, EngineError> {
    if let Some(offset) = offset {
        tracing::debug!(offset, "high_low_spread ignores the resampling offset");
    }
    Ok(TimeSeries::from_points(candles.iter().map(|c| (c.timestamp, c.high - c.low)))?)
}
