//! Small statistical helpers shared by the decoder, the evaluator tests, and
//! the mixture diagnostic.

/// Arithmetic mean. Returns 0.0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Returns 0.0 for fewer than
/// two values.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient between two equal-length slices.
///
/// Returns 0.0 when either side has zero variance (constant vector), rather
/// than propagating NaN into score comparisons.
///
/// # Panics
///
/// Panics if the slices differ in length.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "Pearson inputs must have equal length");
    let n = x.len();
    if n == 0 {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    covariance / (var_x.sqrt() * var_y.sqrt())
}

/// Standard normal cumulative distribution function.
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Upper-tail probability `P(X > x)` for `X ~ Normal(mean, sd)`.
///
/// `sd` must be positive; callers guard the degenerate case.
#[must_use]
pub fn normal_upper_tail(x: f64, mean: f64, sd: f64) -> f64 {
    1.0 - normal_cdf((x - mean) / sd)
}

/// Standard normal probability density at `x` for `Normal(mean, sd)`.
#[must_use]
pub fn normal_pdf(x: f64, mean: f64, sd: f64) -> f64 {
    let z = (x - mean) / sd;
    (-0.5 * z * z).exp() / (sd * (2.0 * std::f64::consts::PI).sqrt())
}

/// Error function approximation (Abramowitz & Stegun 7.1.26, max error ~1.5e-7).
#[must_use]
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// Chi-square upper-tail p-value for `chi_sq` with `df` degrees of freedom.
///
/// Used by the sampling-frequency goodness-of-fit checks.
#[must_use]
pub fn chi_squared_p_value(chi_sq: f64, df: usize) -> f64 {
    let k = df as f64 / 2.0;
    let x = chi_sq / 2.0;
    (1.0 - incomplete_gamma(k, x)).clamp(0.0, 1.0)
}

/// Regularized lower incomplete gamma function by series expansion.
fn incomplete_gamma(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut term = 1.0 / a;
    sum += term;

    for n in 1..200 {
        term *= x / (a + n as f64);
        sum += term;
        if term.abs() < 1e-12 {
            break;
        }
    }

    let gamma_a = gamma(a);
    if gamma_a == 0.0 {
        return 0.0;
    }

    (sum * x.powf(a) * (-x).exp() / gamma_a).clamp(0.0, 1.0)
}

/// Gamma function via the Lanczos approximation.
fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let g = 7_usize;
        let c = [
            0.99999999999980993,
            676.5203681218851,
            -1259.1392167224028,
            771.32342877765313,
            -176.61502916214059,
            12.507343278686905,
            -0.13857109526572012,
            9.9843695780195716e-6,
            1.5056327351493116e-7,
        ];

        let t = x + g as f64 + 0.5;
        let mut a = c[0];

        for (i, coefficient) in c.iter().enumerate().skip(1) {
            a += coefficient / (x + i as f64);
        }

        (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
    }
}
