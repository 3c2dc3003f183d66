// Returns engine: periodic, cumulative and point-to-point returns plus the
// compounding conversions built on them.
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{PriceSeries, ReturnSeries};

use crate::error::{ensure_positive, EngineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    /// Fractional change alone.
    #[default]
    Net,
    /// Growth factor, net + 1.
    Gross,
}

impl FromStr for ReturnType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "net" | "simple" => Ok(ReturnType::Net),
            "gross" => Ok(ReturnType::Gross),
            other => Err(EngineError::InvalidParameter(format!("Unknown return type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsOptions {
    pub kind: ReturnType,
    /// Compound the periodic returns into a running product over the full index.
    pub cumulative: bool,
    /// When set, a single point-to-point return is computed instead of a series.
    pub start: Option<DateTime<Utc>>,
    /// Defaults to the last observation.
    pub end: Option<DateTime<Utc>>,
    /// Number of observations between the two compared prices.
    pub period: usize,
}

impl Default for ReturnsOptions {
    fn default() -> Self {
        Self {
            kind: ReturnType::Net,
            cumulative: false,
            start: None,
            end: None,
            period: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Returns {
    PointToPoint(f64),
    Periodic(ReturnSeries),
}

impl Returns {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Returns::PointToPoint(value) => Some(*value),
            Returns::Periodic(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&ReturnSeries> {
        match self {
            Returns::PointToPoint(_) => None,
            Returns::Periodic(series) => Some(series),
        }
    }
}

fn relative_offset(kind: ReturnType) -> f64 {
    match kind {
        ReturnType::Net => 0.0,
        ReturnType::Gross => 1.0,
    }
}

fn ratio(value: f64, reference: f64, at: DateTime<Utc>) -> Result<f64, EngineError> {
    if reference == 0.0 {
        return Err(EngineError::ArithmeticDomainError(format!(
            "Reference price is zero at {}",
            at
        )));
    }
    Ok(value / reference)
}

/// Dispatches to [`point_to_point_return`] when `options.start` is set and to
/// [`periodic_returns`] otherwise.
pub fn returns(series: &PriceSeries, options: &ReturnsOptions) -> Result<Returns, EngineError> {
    match options.start {
        Some(start) => point_to_point_return(series, start, options.end, options.kind).map(Returns::PointToPoint),
        None => periodic_returns(series, options).map(Returns::Periodic),
    }
}

pub fn point_to_point_return(
    series: &PriceSeries,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    kind: ReturnType,
) -> Result<f64, EngineError> {
    let end = end
        .or_else(|| series.last_timestamp())
        .ok_or_else(|| EngineError::shape("point_to_point_return", 1, 0))?;
    let lookup = |at: DateTime<Utc>| {
        series
            .get(&at)
            .ok_or_else(|| EngineError::InvalidParameter(format!("No observation at {}", at)))
    };
    let start_value = lookup(start)?;
    let end_value = lookup(end)?;

    tracing::debug!(%start, %end, "{} / {} - 1", end_value, start_value);
    Ok(ratio(end_value, start_value, start)? - 1.0 + relative_offset(kind))
}

/// `series[i] / series[i - period] - 1` (+1 for gross returns).
///
/// Without `cumulative` the first `period` observations have no reference and
/// are dropped, so the output is `period` entries shorter than the input.
/// With `cumulative` the output keeps the full index: the leading `period`
/// entries hold the rebasing value 1.0 and later entries the running product.
pub fn periodic_returns(series: &PriceSeries, options: &ReturnsOptions) -> Result<ReturnSeries, EngineError> {
    let period = options.period;
    ensure_positive("period", period)?;
    let values = series.values();
    if values.len() <= period {
        return Err(EngineError::shape("periodic_returns", period.saturating_add(1), values.len()));
    }

    let offset = relative_offset(options.kind);
    let index = series.index();
    let shifted = (period..values.len())
        .map(|i| -> Result<f64, EngineError> {
            Ok(ratio(values[i], values[i - period], index[i - period])? - 1.0 + offset)
        })
        .collect::<Result<Vec<f64>, EngineError>>()?;

    if options.cumulative {
        let mut compounded = vec![1.0; period];
        let mut running = 1.0;
        compounded.extend(shifted.into_iter().map(|r| {
            running *= r;
            running
        }));
        Ok(series.with_values(compounded)?)
    } else {
        Ok(series.skip(period).with_values(shifted)?)
    }
}

/// Net returns between consecutive observations (one business day for daily prices).
pub fn daily_returns(series: &PriceSeries) -> Result<ReturnSeries, EngineError> {
    periodic_returns(series, &ReturnsOptions::default())
}

/// `ln(1 + r)`, the continuously compounded equivalent of a simple return.
pub fn continuously_compounded(r: f64) -> Result<f64, EngineError> {
    let growth = 1.0 + r;
    if growth <= 0.0 {
        return Err(EngineError::ArithmeticDomainError(format!(
            "Cannot take the log of a growth factor of {}",
            growth
        )));
    }
    Ok(growth.ln())
}

/// Log returns over the same window as [`returns`], always on net returns and
/// never cumulative.
pub fn cc_returns(series: &PriceSeries, options: &ReturnsOptions) -> Result<Returns, EngineError> {
    let net = ReturnsOptions {
        kind: ReturnType::Net,
        cumulative: false,
        ..options.clone()
    };
    match returns(series, &net)? {
        Returns::PointToPoint(r) => continuously_compounded(r).map(Returns::PointToPoint),
        Returns::Periodic(rets) => {
            let logs = rets
                .values()
                .iter()
                .map(|r| continuously_compounded(*r))
                .collect::<Result<Vec<f64>, EngineError>>()?;
            Ok(Returns::Periodic(rets.with_values(logs)?))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageReturnsOptions {
    /// Whether the input holds net or gross returns.
    pub kind: ReturnType,
    /// Only every `period`-th return takes part in the chain.
    pub period: usize,
}

impl Default for AverageReturnsOptions {
    fn default() -> Self {
        Self {
            kind: ReturnType::Net,
            period: 1,
        }
    }
}

/// Geometric chain of the returns at positions `0, period, 2 * period, ...`.
pub fn average_returns(returns: &[f64], options: &AverageReturnsOptions) -> Result<f64, EngineError> {
    ensure_positive("period", options.period)?;
    let relative = match options.kind {
        ReturnType::Net => 0.0,
        ReturnType::Gross => -1.0,
    };
    let growth: f64 = returns
        .iter()
        .step_by(options.period)
        .map(|r| 1.0 + r + relative)
        .product();
    Ok(growth - 1.0)
}

/// Projects a per-period return over `periods_per_year` periods with simple compounding.
pub fn annualized_returns(ret_per_period: f64, periods_per_year: f64) -> f64 {
    (1.0 + ret_per_period).powf(periods_per_year) - 1.0
}

pub fn cc_annualize_returns(ret_per_period: f64, periods_per_year: f64) -> Result<f64, EngineError> {
    continuously_compounded(annualized_returns(ret_per_period, periods_per_year))
}
