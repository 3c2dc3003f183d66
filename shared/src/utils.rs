// Gap handling for raw observations coming out of the data layer.
// Indicator and return computations assume every value is present, so
// loaders run `fill_gaps` before building a series.

/// Carries the last seen value forward over missing entries.
/// Leading gaps stay missing.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

/// Carries the next seen value backward over missing entries.
/// Trailing gaps stay missing.
pub fn back_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut next = None;
    let mut filled: Vec<Option<f64>> = values
        .iter()
        .rev()
        .map(|v| {
            if v.is_some() {
                next = *v;
            }
            next
        })
        .collect();
    filled.reverse();
    filled
}

/// Forward-fills, then back-fills the leading gap.
/// Returns `None` when no value is present at all.
pub fn fill_gaps(values: &[Option<f64>]) -> Option<Vec<f64>> {
    back_fill(&forward_fill(values)).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_fill_keeps_leading_gap() {
        let filled = forward_fill(&[None, Some(1.0), None, Some(3.0), None]);
        assert_eq!(filled, vec![None, Some(1.0), Some(1.0), Some(3.0), Some(3.0)]);
    }

    #[test]
    fn test_back_fill_keeps_trailing_gap() {
        let filled = back_fill(&[None, Some(1.0), None, Some(3.0), None]);
        assert_eq!(filled, vec![Some(1.0), Some(1.0), Some(3.0), Some(3.0), None]);
    }

    #[test]
    fn test_fill_gaps() {
        assert_eq!(fill_gaps(&[None, None, Some(2.0), None]), Some(vec![2.0, 2.0, 2.0, 2.0]));
        assert_eq!(fill_gaps(&[None, None]), None);
        assert_eq!(fill_gaps(&[]), Some(vec![]));
    }
}
