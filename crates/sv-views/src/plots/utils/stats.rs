//! Statistical utilities for plots

/// Calculate quartiles using linear interpolation.
///
/// Matches the percentile convention spreadsheets and pandas use, so the
/// reported 25/50/75 values line up with what students see elsewhere.
pub fn calculate_quartiles(values: &[f64]) -> (f64, f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n == 0 {
        return (f64::NAN, f64::NAN, f64::NAN);
    }

    let q1_idx = (n - 1) as f64 * 0.25;
    let q2_idx = (n - 1) as f64 * 0.5;
    let q3_idx = (n - 1) as f64 * 0.75;

    let q1 = interpolate(&sorted, q1_idx);
    let q2 = interpolate(&sorted, q2_idx);
    let q3 = interpolate(&sorted, q3_idx);

    (q1, q2, q3)
}

fn interpolate(sorted: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper || upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); NaN for fewer than two
/// values, which is displayed verbatim rather than special-cased.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate_linearly() {
        let (q1, q2, q3) = calculate_quartiles(&[10.0, 20.0, 30.0, 40.0]);
        assert!((q1 - 17.5).abs() < 1e-9);
        assert!((q2 - 25.0).abs() < 1e-9);
        assert!((q3 - 32.5).abs() < 1e-9);
    }

    #[test]
    fn quartiles_of_empty_slice_are_nan() {
        let (q1, q2, q3) = calculate_quartiles(&[]);
        assert!(q1.is_nan() && q2.is_nan() && q3.is_nan());
    }

    #[test]
    fn quartiles_of_single_value_collapse() {
        let (q1, q2, q3) = calculate_quartiles(&[7.0]);
        assert_eq!((q1, q2, q3), (7.0, 7.0, 7.0));
    }

    #[test]
    fn nan_values_sort_last_without_panicking() {
        let (q1, q2, _) = calculate_quartiles(&[f64::NAN, 1.0, 2.0]);
        assert!((q1 - 1.5).abs() < 1e-9);
        assert!((q2 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        // var = (225 + 25 + 25 + 225) / 3
        let std = sample_std(&[10.0, 20.0, 30.0, 40.0]);
        assert!((std - (500.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn sample_std_degenerates_to_nan_below_two_values() {
        assert!(sample_std(&[]).is_nan());
        assert!(sample_std(&[5.0]).is_nan());
    }

    #[test]
    fn mean_of_empty_slice_is_nan() {
        assert!(mean(&[]).is_nan());
    }
}
