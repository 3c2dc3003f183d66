// Weighted moving-average engine shared by the SMA, EMA and MACD indicators.
use std::str::FromStr;

use crate::error::{ensure_positive, EngineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovingAverageKind {
    Simple,
    Exponential,
}

impl FromStr for MovingAverageKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "sma" => Ok(MovingAverageKind::Simple),
            "exponential" | "ema" => Ok(MovingAverageKind::Exponential),
            other => Err(EngineError::InvalidParameter(format!(
                "Unknown moving average type: {}",
                other
            ))),
        }
    }
}

/// Kernel weights for a window of `periods` samples, normalized to sum to 1.
///
/// The exponential kernel is `exp(linspace(-1, 0, periods))`; its first weight
/// is applied to the current sample by [`causal_convolve`].
pub fn weights(periods: usize, kind: MovingAverageKind) -> Vec<f64> {
    let raw: Vec<f64> = match kind {
        MovingAverageKind::Simple => vec![1.0; periods],
        MovingAverageKind::Exponential => match periods {
            0 => Vec::new(),
            1 => vec![(-1.0f64).exp()],
            _ => {
                let step = 1.0 / (periods - 1) as f64;
                (0..periods).map(|j| (-1.0 + j as f64 * step).exp()).collect()
            }
        },
    };
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Full convolution of `data` with `kernel`, truncated to `data.len()` samples.
/// Positions before index 0 count as zero.
pub fn causal_convolve(data: &[f64], kernel: &[f64]) -> Vec<f64> {
    (0..data.len())
        .map(|i| {
            kernel
                .iter()
                .take(i + 1)
                .enumerate()
                .map(|(k, w)| w * data[i - k])
                .sum::<f64>()
        })
        .collect()
}

/// `periods`-sample moving average of `data`, same length as the input.
///
/// The first `periods` outputs are overwritten with the value at position
/// `periods`, so the series needs more than `periods` observations.
pub fn moving_average(data: &[f64], periods: usize, kind: MovingAverageKind) -> Result<Vec<f64>, EngineError> {
    ensure_positive("periods", periods)?;
    if data.len() <= periods {
        return Err(EngineError::shape("moving_average", periods.saturating_add(1), data.len()));
    }

    let mut averaged = causal_convolve(data, &weights(periods, kind));
    let bootstrap = averaged[periods];
    averaged[..periods].fill(bootstrap);
    Ok(averaged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len(), "Vectors differ in length");
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).abs() < 1e-9, "Mismatch at index {}: {} != {}", i, x, y);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        for periods in 1..10 {
            for kind in [MovingAverageKind::Simple, MovingAverageKind::Exponential] {
                let total: f64 = weights(periods, kind).iter().sum();
                assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_exponential_weights_grow_towards_the_window_end() {
        let w = weights(3, MovingAverageKind::Exponential);
        let raw = [(-1.0f64).exp(), (-0.5f64).exp(), 1.0];
        let total: f64 = raw.iter().sum();
        assert_close(&w, &[raw[0] / total, raw[1] / total, raw[2] / total]);
    }

    #[test]
    fn test_causal_convolve_zero_pads() {
        let out = causal_convolve(&[1.0, 2.0, 3.0, 4.0], &[0.5, 0.5]);
        assert_close(&out, &[0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_simple_moving_average_bootstrap() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ma = moving_average(&data, 3, MovingAverageKind::Simple).unwrap();
        // position 3 averages 2, 3, 4
        assert_close(&ma, &[3.0, 3.0, 3.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_warm_up_equals_position_periods() {
        let data: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        for periods in [1, 2, 5, 14, 39] {
            let ma = moving_average(&data, periods, MovingAverageKind::Simple).unwrap();
            assert_eq!(ma.len(), data.len());
            assert!(ma[..periods].iter().all(|v| *v == ma[periods]));
        }
    }

    #[test]
    fn test_constant_series_is_unchanged() {
        let data = vec![42.5; 30];
        for kind in [MovingAverageKind::Simple, MovingAverageKind::Exponential] {
            for periods in [1, 3, 12, 26] {
                let ma = moving_average(&data, periods, kind).unwrap();
                assert_close(&ma, &data);
            }
        }
    }

    #[test]
    fn test_exponential_average_of_linear_series() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let ma = moving_average(&data, 2, MovingAverageKind::Exponential).unwrap();
        let (w0, w1) = ((-1.0f64).exp() / (1.0 + (-1.0f64).exp()), 1.0 / (1.0 + (-1.0f64).exp()));
        let at_two = w0 * 3.0 + w1 * 2.0;
        let at_three = w0 * 4.0 + w1 * 3.0;
        assert_close(&ma, &[at_two, at_two, at_two, at_three]);
    }

    #[test]
    fn test_invalid_periods() {
        assert!(matches!(
            moving_average(&[1.0, 2.0], 0, MovingAverageKind::Simple),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            moving_average(&[1.0, 2.0, 3.0], 3, MovingAverageKind::Simple),
            Err(EngineError::ShapeMismatch { required: 4, actual: 3, .. })
        ));
        assert!(matches!(
            moving_average(&[1.0, 2.0], usize::MAX, MovingAverageKind::Simple),
            Err(EngineError::ShapeMismatch { required: usize::MAX, actual: 2, .. })
        ));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Exponential".parse::<MovingAverageKind>().unwrap(), MovingAverageKind::Exponential);
        assert_eq!("sma".parse::<MovingAverageKind>().unwrap(), MovingAverageKind::Simple);
        assert!("weighted".parse::<MovingAverageKind>().is_err());
    }
}
