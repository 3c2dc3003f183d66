// Return and risk analytics over price and return series
pub mod returns;
pub mod risk;
pub mod stats;

pub use returns::{
    annualized_returns, average_returns, cc_annualize_returns, cc_returns, daily_returns, periodic_returns,
    point_to_point_return, returns, AverageReturnsOptions, ReturnType, Returns, ReturnsOptions,
};
pub use risk::{annualized_sharpe_ratio, high_low_spread, qstk_get_sharpe_ratio, sharpe_ratio, TRADING_DAYS_PER_YEAR};
