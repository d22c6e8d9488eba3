//! Random draws used by the preset generators and the noise table.
//!
//! All randomness in the crate goes through an injected [`rand::Rng`], so a
//! seeded generator reproduces presets and noise exactly.

use rand::Rng;

/// Resolution of [`SfxRng::rand_float`]: draws are multiples of `range / 10000`.
const FLOAT_STEPS: u32 = 10_000;

/// Extension trait providing the three draws sound design needs.
///
/// Automatically implemented for every [`Rng`].
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use sfxr::SfxRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let die = rng.rand_int(5);
/// assert!(die <= 5);
/// let x = rng.rand_float(0.3);
/// assert!((0.0..0.3).contains(&x));
/// ```
pub trait SfxRng: Rng {
    /// Uniform integer in `0..=max`.
    fn rand_int(&mut self, max: u32) -> u32 {
        self.gen_range(0..=max)
    }

    /// Uniform float in `[0, range)`, quantized to 1/10000 of the range.
    fn rand_float(&mut self, range: f32) -> f32 {
        self.gen_range(0..FLOAT_STEPS) as f32 / FLOAT_STEPS as f32 * range
    }

    /// Fair coin.
    fn coin(&mut self) -> bool {
        self.rand_int(1) == 1
    }

    /// Uniform float in `[-1, 1)`, the building block of bipolar draws.
    fn rand_bipolar(&mut self) -> f32 {
        self.rand_float(2.0) - 1.0
    }
}

impl<R: Rng + ?Sized> SfxRng for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_zero_stream_gives_minimum_draws() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(rng.rand_int(6), 0);
        assert_eq!(rng.rand_float(0.5), 0.0);
        assert!(!rng.coin());
        assert_eq!(rng.rand_bipolar(), -1.0);
    }

    #[test]
    fn test_int_range_inclusive() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let v = rng.rand_int(2);
            assert!(v <= 2);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value in 0..=2 should appear");
    }

    #[test]
    fn test_float_range() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..10_000 {
            let v = rng.rand_float(0.7);
            assert!((0.0..0.7).contains(&v));
        }
    }

    #[test]
    fn test_coin_is_roughly_fair() {
        let mut rng = StdRng::seed_from_u64(5);
        let heads = (0..10_000).filter(|_| rng.coin()).count();
        assert!((4_500..5_500).contains(&heads));
    }

    #[test]
    fn test_seeded_streams_repeat() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert_eq!(a.rand_float(1.0), b.rand_float(1.0));
        }
    }
}
