//! Distribution approximations used for inference.
//!
//! All p-values in this engine come from closed-form approximations rather
//! than exact Student-t / F distributions:
//!
//! - The standard normal CDF uses the Abramowitz & Stegun 7.1.26 error
//!   function approximation (absolute error ≈ 1.5e-7). For coefficient
//!   tests this is the large-sample normal approximation to the t
//!   distribution and is inaccurate for small samples.
//! - F and χ² tail probabilities use the Paulson and Wilson-Hilferty
//!   normal approximations respectively.
//! - Interval critical values are the fixed two-sided normal quantiles
//!   1.96 (95%) and 2.58 (99%); any other confidence level falls back to
//!   the 95% value.
//!
//! These simplifications are deliberate and documented; exact inference
//! for small samples is out of scope.

/// Error function via Abramowitz & Stegun formula 7.1.26.
///
/// Maximum absolute error ≈ 1.5e-7.
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal cumulative distribution function.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Two-sided p-value for a z/t statistic under the normal approximation.
pub fn two_sided_p_value(t: f64) -> f64 {
    (2.0 * (1.0 - normal_cdf(t.abs()))).clamp(0.0, 1.0)
}

/// Two-sided critical value for a confidence level.
///
/// 0.95 → 1.96, 0.99 → 2.58; every other level uses the 0.95 value.
pub fn critical_value(confidence_level: f64) -> f64 {
    if (confidence_level - 0.99).abs() < 1e-9 {
        2.58
    } else {
        1.96
    }
}

/// Upper-tail χ² probability via the Wilson-Hilferty cube-root normal
/// approximation. Exact for the df = 2 case (`exp(-x/2)`).
pub fn chi_square_pvalue(x: f64, df: usize) -> f64 {
    if x <= 0.0 || df == 0 {
        return 1.0;
    }
    if df == 2 {
        return (-x / 2.0).exp().clamp(0.0, 1.0);
    }
    let k = df as f64;
    let c = 2.0 / (9.0 * k);
    let z = ((x / k).powf(1.0 / 3.0) - (1.0 - c)) / c.sqrt();
    (1.0 - normal_cdf(z)).clamp(0.0, 1.0)
}

/// Upper-tail F probability via the Paulson normal approximation.
pub fn f_pvalue(f: f64, df1: usize, df2: usize) -> f64 {
    if f <= 0.0 || df1 == 0 || df2 == 0 {
        return 1.0;
    }
    let d1 = df1 as f64;
    let d2 = df2 as f64;
    let cube = f.powf(1.0 / 3.0);
    let num = (1.0 - 2.0 / (9.0 * d2)) * cube - (1.0 - 2.0 / (9.0 * d1));
    let den = (2.0 / (9.0 * d1) * cube * cube + 2.0 / (9.0 * d2)).sqrt();
    if den < 1e-12 {
        return 1.0;
    }
    (1.0 - normal_cdf(num / den)).clamp(0.0, 1.0)
}
