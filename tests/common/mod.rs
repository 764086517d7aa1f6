//! Common test utilities and data generators.

use regression_engine::prelude::*;

/// Simple deterministic "random" in [-1, 1) for reproducibility.
#[allow(dead_code)]
pub fn lcg_noise(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    ((*state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
}

/// Generate rows from `y = intercept + slope * x + noise_std * e`.
#[allow(dead_code)]
pub fn generate_linear_rows(
    n: usize,
    intercept: f64,
    slope: f64,
    noise_std: f64,
    seed: u64,
) -> Vec<ObservationRow> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            let x = i as f64 / 4.0;
            let y = intercept + slope * x + noise_std * lcg_noise(&mut state);
            ObservationRow::new([("x", x), ("y", y)])
        })
        .collect()
}

/// Generate binary-outcome rows from a latent logistic threshold.
#[allow(dead_code)]
pub fn generate_binary_rows(n: usize, slope: f64, seed: u64) -> Vec<ObservationRow> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            let x = i as f64 / n as f64 * 6.0 - 3.0;
            let p = 1.0 / (1.0 + (-slope * x).exp());
            let y = if (lcg_noise(&mut state) + 1.0) / 2.0 < p { 1.0 } else { 0.0 };
            ObservationRow::new([("x", x), ("y", y)])
        })
        .collect()
}

/// Default OLS configuration for `y ~ x` with an intercept.
#[allow(dead_code)]
pub fn simple_config() -> RegressionConfig {
    RegressionConfig::builder()
        .dependent("y")
        .independents(["x"])
        .build()
        .unwrap()
}
