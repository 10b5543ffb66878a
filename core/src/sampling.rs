//! Per-tick random draws for the simulator.

use crate::traits::RandomSource;
use rand::RngCore;
use rand_distr::{Distribution, Normal, Poisson};

/// Largest mean drawn with Knuth's product of uniforms, which costs O(mean).
const KNUTH_MAX_MEAN: f64 = 30.0;

/// Above this mean the Poisson is indistinguishable from `N(mean, mean)` and
/// the rejection sampler starts losing precision.
const NORMAL_MIN_MEAN: f64 = 1e12;

/// Draws `k ~ Poisson(mean)` in O(1) expected time.
///
/// Small means use Knuth's method: multiply uniforms until the running
/// product drops to `e^-mean`; the sample is the number of factors minus one.
/// Larger means go through `rand_distr`, fed by the same uniform source.
pub fn sample_poisson(mean: f64, rng: &mut dyn RandomSource) -> u64 {
    if !(mean > 0.0) || !mean.is_finite() {
        return 0;
    }
    if mean <= KNUTH_MAX_MEAN {
        return knuth_poisson(mean, rng);
    }
    let mut bits = UniformBits(rng);
    let sample = if mean < NORMAL_MIN_MEAN {
        Poisson::new(mean).map_or(mean, |poisson| poisson.sample(&mut bits))
    } else {
        Normal::new(mean, mean.sqrt()).map_or(mean, |normal| normal.sample(&mut bits).round())
    };
    // `as` saturates, so a huge mean lands on u64::MAX instead of wrapping.
    sample.max(0.0) as u64
}

fn knuth_poisson(mean: f64, rng: &mut dyn RandomSource) -> u64 {
    let limit = (-mean).exp();
    let mut k = 0;
    let mut product = 1.0;
    loop {
        k += 1;
        product *= rng.next_uniform();
        if product <= limit {
            return k - 1;
        }
    }
}

/// Presents a [`RandomSource`] as an `RngCore` so `rand_distr` can sample
/// from it. `rand` rebuilds an `f64` from the top 53 bits of `next_u64`, so a
/// uniform survives the round trip unchanged.
struct UniformBits<'a>(&'a mut dyn RandomSource);

impl RngCore for UniformBits<'_> {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        ((self.0.next_uniform() * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Probability that an exponential service with `rate` completes within one tick.
pub fn completion_probability(rate: f64) -> f64 {
    if !(rate > 0.0) {
        return 0.0;
    }
    1.0 - (-rate).exp()
}

pub fn bernoulli(p: f64, rng: &mut dyn RandomSource) -> bool {
    rng.next_uniform() < p
}

/// A fixed, cyclic sequence of uniforms for exact tick-by-tick trajectories.
///
/// Values are clamped into `[0, 1)`; an empty script yields `0.0`. A script
/// made only of values near 1 never satisfies the Poisson stopping rule, and
/// scripts are only meaningful for means small enough for Knuth's method.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of uniforms consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
