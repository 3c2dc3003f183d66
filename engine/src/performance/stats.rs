//! Small descriptive statistics over slices of `f64`.
//!
//! Each function returns `None` when the slice is too short for the statistic.

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

fn sum_of_squares(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    Some(data.iter().map(|x| (x - m) * (x - m)).sum())
}

/// Standard deviation dividing by `n`.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    sum_of_squares(data).map(|ss| (ss / data.len() as f64).sqrt())
}

/// Standard deviation dividing by `n - 1`. Needs at least two values.
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    sum_of_squares(data).map(|ss| (ss / (data.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_std_devs() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(population_std_dev(&data), Some(2.0));
        let sample = sample_std_dev(&data).unwrap();
        assert!((sample - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(population_std_dev(&[1.0]), Some(0.0));
    }
}
