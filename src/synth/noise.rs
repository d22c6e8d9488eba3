//! Noise lookup table for the noise waveform.

use rand::Rng;

use crate::random::SfxRng;

/// Number of noise values per oscillator period.
pub const NOISE_LEN: usize = 32;

/// A period's worth of uniform noise in `[-1, 1)`.
///
/// The table is refilled at the start of each note and, for the noise
/// waveform, every time the oscillator wraps. Reading it back stretches
/// the 32 values across the current period, so pitch still applies.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseTable {
    values: [f32; NOISE_LEN],
}

impl NoiseTable {
    pub fn new() -> Self {
        Self {
            values: [0.0; NOISE_LEN],
        }
    }

    /// Replaces every entry with a fresh draw from `rng`.
    pub fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for value in self.values.iter_mut() {
            *value = rng.rand_bipolar();
        }
    }

    /// Value for `phase` within a period of `period` samples.
    ///
    /// `phase` must be in `0..period`.
    pub fn sample(&self, phase: i32, period: i32) -> f32 {
        let index = (phase as i64 * NOISE_LEN as i64 / period as i64) as usize;
        self.values[index.min(NOISE_LEN - 1)]
    }
}

impl Default for NoiseTable {
    fn default() -> Self {
        Self::new()
    }
}
