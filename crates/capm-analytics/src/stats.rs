//! Sample moments that skip undefined observations.
//!
//! Every estimator uses the unbiased `n - 1` denominator and returns `NaN` when
//! fewer than two finite observations remain.

use ndarray::ArrayView1;

/// Arithmetic mean of the finite entries.
pub fn sample_mean(values: ArrayView1<'_, f64>) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Unbiased sample variance of the finite entries.
pub fn sample_variance(values: ArrayView1<'_, f64>) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return f64::NAN;
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let sum_sq: f64 = finite.iter().map(|v| (v - mean).powi(2)).sum();
    sum_sq / (n - 1.0)
}

/// Unbiased sample standard deviation of the finite entries.
pub fn sample_std(values: ArrayView1<'_, f64>) -> f64 {
    sample_variance(values).sqrt()
}

/// Unbiased sample covariance over the positions where both series are finite.
///
/// Positions past the end of the shorter series are ignored.
pub fn sample_covariance(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let sum_xy: f64 = pairs.iter().map(|(a, b)| (a - mean_x) * (b - mean_y)).sum();
    sum_xy / (n - 1.0)
}
