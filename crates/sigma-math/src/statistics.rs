//! Descriptive statistics over return samples.
//!
//! All functions are total: a sample too small or too flat for a moment to
//! exist yields `NaN` rather than an error, so undefined values flow
//! through to the caller unchanged.
//!
//! Dispersion uses the sample (n - 1) convention throughout.

use statrs::statistics::Statistics;

/// Arithmetic mean. `NaN` for an empty sample.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Sample standard deviation. `NaN` for fewer than two observations.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    values.iter().std_dev()
}

/// Bias-corrected sample skewness (adjusted Fisher-Pearson, G1).
///
/// ```text
/// G1 = sqrt(n (n - 1)) / (n - 2) * m3 / m2^1.5
/// ```
///
/// where `m2`, `m3` are the central moments. `NaN` for fewer than three
/// observations or zero variance.
#[must_use]
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    if is_constant(values) {
        return f64::NAN;
    }
    let (m2, m3, _) = central_moments(values);
    let n = n as f64;
    (n * (n - 1.0)).sqrt() / (n - 2.0) * m3 / m2.powf(1.5)
}

/// Bias-corrected sample excess kurtosis (G2).
///
/// ```text
/// G2 = (n - 1) / ((n - 2)(n - 3)) * ((n + 1) * m4 / m2^2 - 3 (n - 1))
/// ```
///
/// A normal sample scores near zero. `NaN` for fewer than four
/// observations or zero variance.
#[must_use]
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return f64::NAN;
    }
    if is_constant(values) {
        return f64::NAN;
    }
    let (m2, _, m4) = central_moments(values);
    let n = n as f64;
    (n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * m4 / (m2 * m2) - 3.0 * (n - 1.0))
}

/// Mean absolute deviation around the mean. `NaN` for an empty sample.
#[must_use]
pub fn mean_absolute_deviation(values: &[f64]) -> f64 {
    let mu = mean(values);
    values.iter().map(|v| (v - mu).abs()).mean()
}

/// Pearson correlation of two equally long samples.
///
/// `NaN` if the lengths differ, there are fewer than two pairs, or either
/// sample has zero variance.
#[must_use]
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return f64::NAN;
    }
    let cov = xs.iter().covariance(ys.iter());
    let denom = std_dev(xs) * std_dev(ys);
    if denom > 0.0 {
        cov / denom
    } else {
        f64::NAN
    }
}

/// True if every observation equals the first.
///
/// Checked directly instead of testing `m2 == 0`, which rounding in the
/// mean can miss.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Population central moments `(m2, m3, m4)`.
fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    let mu = mean(values);
    let n = values.len() as f64;
    let (s2, s3, s4) = values.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), v| {
        let d = v - mu;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    });
    (s2 / n, s3 / n, s4 / n)
}
