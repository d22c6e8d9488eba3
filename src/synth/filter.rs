//! Resonant low-pass followed by a leaky high-pass.
//!
//! Both stages are single-pole style integrators whose coefficients can sweep
//! over the course of a note. Coefficients are clamped every step, so
//! out-of-range parameters never make the filters blow up.

use crate::params::Parameters;

/// Low-pass and high-pass stages sharing one signal path.
#[derive(Debug, Clone, Default)]
pub struct FilterPair {
    // Low-pass state
    lp_position: f32,
    lp_velocity: f32,
    lp_coefficient: f32,
    lp_sweep: f32,
    lp_damping: f32,
    lp_bypass: bool,

    // High-pass state
    hp_position: f32,
    hp_coefficient: f32,
    hp_sweep: f32,
}

impl FilterPair {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears filter memory and derives coefficients for a new note.
    pub fn trigger(&mut self, p: &Parameters) {
        self.lp_position = 0.0;
        self.lp_velocity = 0.0;
        self.lp_coefficient = p.lpf_cutoff.powf(3.0) * 0.1;
        self.lp_sweep = 1.0 + p.lpf_cutoff_ramp * 0.0001;
        self.lp_damping = (5.0 / (1.0 + p.lpf_resonance.powf(2.0) * 20.0)
            * (0.01 + self.lp_coefficient))
            .min(0.8);
        self.lp_bypass = p.lpf_cutoff == 1.0;

        self.hp_position = 0.0;
        self.hp_coefficient = p.hpf_cutoff.powf(2.0) * 0.1;
        self.hp_sweep = 1.0 + p.hpf_cutoff_ramp * 0.0003;
    }

    /// Applies the high-pass cutoff sweep; called once per output sample.
    pub fn sweep_highpass(&mut self) {
        if self.hp_sweep != 0.0 {
            self.hp_coefficient = (self.hp_coefficient * self.hp_sweep).clamp(0.00001, 0.1);
        }
    }

    /// Filters one supersample.
    pub fn process(&mut self, input: f32) -> f32 {
        let previous = self.lp_position;

        self.lp_coefficient = (self.lp_coefficient * self.lp_sweep).clamp(0.0, 0.1);
        if self.lp_bypass {
            self.lp_position = input;
            self.lp_velocity = 0.0;
        } else {
            self.lp_velocity += (input - self.lp_position) * self.lp_coefficient;
            self.lp_velocity -= self.lp_velocity * self.lp_damping;
        }
        self.lp_position += self.lp_velocity;

        self.hp_position += self.lp_position - previous;
        self.hp_position -= self.hp_position * self.hp_coefficient;
        self.hp_position
    }

    #[cfg(test)]
    pub(crate) fn highpass_coefficient(&self) -> f32 {
        self.hp_coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Parameters {
        Parameters::default()
    }

    #[test]
    fn test_bypass_passes_steps_through() {
        let mut filters = FilterPair::new();
        filters.trigger(&params());
        // With the high-pass nearly closed a step comes through almost intact
        let out = filters.process(0.5);
        assert!((out - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_highpass_removes_dc() {
        let mut p = params();
        p.hpf_cutoff = 0.5;
        let mut filters = FilterPair::new();
        filters.trigger(&p);
        let mut out = 0.0;
        for _ in 0..5000 {
            filters.sweep_highpass();
            out = filters.process(0.5);
        }
        assert!(out.abs() < 1e-3, "DC should decay, got {out}");
    }

    #[test]
    fn test_highpass_coefficient_is_clamped() {
        let mut p = params();
        p.hpf_cutoff = 1.0;
        p.hpf_cutoff_ramp = 1.0;
        let mut filters = FilterPair::new();
        filters.trigger(&p);
        for _ in 0..10_000 {
            filters.sweep_highpass();
        }
        assert_eq!(filters.highpass_coefficient(), 0.1);

        p.hpf_cutoff = 0.0;
        p.hpf_cutoff_ramp = -1.0;
        filters.trigger(&p);
        filters.sweep_highpass();
        assert_eq!(filters.highpass_coefficient(), 0.00001);
    }

    #[test]
    fn test_lowpass_smooths_square() {
        let mut p = params();
        p.lpf_cutoff = 0.3;
        let mut filters = FilterPair::new();
        filters.trigger(&p);

        let mut max_step: f32 = 0.0;
        let mut last = 0.0;
        for i in 0..2000 {
            let input = if (i / 50) % 2 == 0 { 0.5 } else { -0.5 };
            let out = filters.process(input);
            max_step = max_step.max((out - last).abs());
            last = out;
        }
        assert!(max_step < 0.1, "low-pass should limit slew, got {max_step}");
    }

    #[test]
    fn test_extreme_resonance_stays_finite() {
        let mut p = params();
        p.lpf_cutoff = 1.5;
        p.lpf_resonance = 3.0;
        p.lpf_cutoff_ramp = 2.0;
        let mut filters = FilterPair::new();
        filters.trigger(&p);
        for i in 0..10_000 {
            let out = filters.process(if i % 7 < 3 { 1.0 } else { -1.0 });
            assert!(out.is_finite());
        }
    }

    #[test]
    fn test_trigger_coefficients() {
        let p = Parameters {
            lpf_cutoff: 0.37,
            lpf_resonance: 0.61,
            hpf_cutoff: 0.23,
            ..Parameters::default()
        };
        let mut filters = FilterPair::new();
        filters.trigger(&p);
        let lp = 0.37f32.powf(3.0) * 0.1;
        assert_eq!(filters.lp_coefficient, lp);
        assert_eq!(
            filters.lp_damping,
            (5.0 / (1.0 + 0.61f32.powf(2.0) * 20.0) * (0.01 + lp)).min(0.8)
        );
        assert_eq!(filters.hp_coefficient, 0.23f32.powf(2.0) * 0.1);
        assert!(!filters.lp_bypass);
    }
}
