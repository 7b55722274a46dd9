pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    smartcore::metrics::mean_absolute_error(&actual.to_vec(), &predicted.to_vec())
}

pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    smartcore::metrics::mean_squared_error(&actual.to_vec(), &predicted.to_vec()).sqrt()
}

/// Coefficient of determination. A constant target scores 1.0 when
/// predicted exactly and 0.0 otherwise.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    let m = mean(actual);
    if actual.iter().all(|a| *a == m) {
        return if actual.iter().zip(predicted).all(|(a, p)| a == p) { 1.0 } else { 0.0 };
    }
    smartcore::metrics::r2(&actual.to_vec(), &predicted.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metrics() {
        let actual = [100.0, 200.0, 300.0];
        let predicted = [110.0, 190.0, 300.0];
        assert!((mean_absolute_error(&actual, &predicted) - 20.0 / 3.0).abs() < 1e-9);
        assert!((root_mean_squared_error(&actual, &predicted) - (200.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_r2_score() {
        let actual = [1.0, 2.0, 3.0];
        assert_eq!(r2_score(&actual, &actual), 1.0);
        assert_eq!(r2_score(&actual, &[2.0, 2.0, 2.0]), 0.0);
        assert_eq!(r2_score(&[5.0, 5.0], &[5.0, 5.0]), 1.0);
        assert_eq!(r2_score(&[5.0, 5.0], &[4.0, 5.0]), 0.0);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
        assert_eq!(std_dev(&[]), 0.0);
    }
}
