//! Simple random number generator for reproducibility.
//!
//! This module provides a lightweight xorshift-based PRNG that doesn't require
//! external dependencies, ensuring reproducible filter initialization across runs.

use std::f32::consts::PI;

/// Simple RNG for reproducibility without external crates.
///
/// Uses xorshift algorithm for fast, deterministic random number generation.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with explicit seed (if zero, use a fixed value).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    /// Basic xorshift to generate u32.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x >> 32) as u32
    }

    /// Convert to [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Sample from the standard normal distribution via Box-Muller.
    ///
    /// The first uniform is nudged away from zero so the logarithm stays finite.
    pub fn next_gaussian(&mut self) -> f32 {
        let u1 = (self.next_f32() + f32::EPSILON).min(1.0);
        let u2 = self.next_f32();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(42);
        let mut rng2 = SimpleRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_next_f32_range() {
        let mut rng = SimpleRng::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f32();
            assert!(val >= 0.0 && val < 1.0);
        }
    }

    #[test]
    fn test_rng_zero_seed_uses_fallback() {
        let mut zero = SimpleRng::new(0);
        let mut fallback = SimpleRng::new(0x9e3779b97f4a7c15);
        assert_eq!(zero.next_u32(), fallback.next_u32());
    }

    #[test]
    fn test_gaussian_finite() {
        let mut rng = SimpleRng::new(67890);

        for _ in 0..1000 {
            assert!(rng.next_gaussian().is_finite());
        }
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = SimpleRng::new(2024);
        let n = 10_000;

        let samples: Vec<f32> = (0..n).map(|_| rng.next_gaussian()).collect();
        let mean: f32 = samples.iter().sum::<f32>() / n as f32;
        let var: f32 =
            samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / n as f32;

        // Loose bounds; standard normal has mean 0 and variance 1.
        assert!(mean.abs() < 0.05, "sample mean {} too far from 0", mean);
        assert!((var - 1.0).abs() < 0.1, "sample variance {} too far from 1", var);
    }
}
