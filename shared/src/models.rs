use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered `(timestamp, value)` observations with strictly increasing timestamps.
///
/// Values are expected to be gap-free: the data layer fills missing
/// observations before a series is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    index: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

/// A series of traded prices, one per period.
pub type PriceSeries = TimeSeries;

/// A series of per-period fractional changes.
pub type ReturnSeries = TimeSeries;

impl TimeSeries {
    pub fn new(index: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(anyhow!(
                "Index has {} timestamps but {} values were supplied",
                index.len(),
                values.len()
            ));
        }
        if let Some(pos) = index.windows(2).position(|w| w[0] >= w[1]) {
            return Err(anyhow!(
                "Timestamps must be strictly increasing: {} is followed by {}",
                index[pos],
                index[pos + 1]
            ));
        }
        Ok(Self { index, values })
    }

    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let (index, values): (Vec<DateTime<Utc>>, Vec<f64>) = points.into_iter().unzip();
        Self::new(index, values)
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.index.first().copied()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.index.last().copied()
    }

    /// Position of `timestamp` in the index, if it is an observation date.
    pub fn position(&self, timestamp: &DateTime<Utc>) -> Option<usize> {
        self.index.binary_search(timestamp).ok()
    }

    /// Value observed exactly at `timestamp`.
    pub fn get(&self, timestamp: &DateTime<Utc>) -> Option<f64> {
        self.position(timestamp).map(|pos| self.values[pos])
    }

    /// New series on the same index carrying `values`.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.index.len() {
            return Err(anyhow!(
                "Cannot align {} values with an index of {} timestamps",
                values.len(),
                self.index.len()
            ));
        }
        Ok(Self {
            index: self.index.clone(),
            values,
        })
    }

    /// Drops the first `count` observations.
    pub fn skip(&self, count: usize) -> Self {
        let count = count.min(self.len());
        Self {
            index: self.index[count..].to_vec(),
            values: self.values[count..].to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub parameters: serde_json::Value,
    pub values: Vec<f64>,
}
