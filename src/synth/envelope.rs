//! Three-stage volume envelope: attack, sustain with punch, decay.

/// Stage of the volume envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Ramping from 0 to 1
    Attack,
    /// Holding at 1 plus a decaying punch bump
    Sustain,
    /// Ramping from 1 to 0
    Decay,
    /// Finished; the voice goes silent
    Stopped,
}

/// Volume envelope with stage lengths measured in output samples.
///
/// Each stage length is `max(1, value² · 100000)` so a zero-length stage
/// still lasts one sample and never divides by zero.
#[derive(Debug, Clone)]
pub struct Envelope {
    stage: EnvelopeStage,
    time: i32,
    lengths: [i32; 3],
    punch: f32,
    volume: f32,
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            stage: EnvelopeStage::Stopped,
            time: 0,
            lengths: [1; 3],
            punch: 0.0,
            volume: 0.0,
        }
    }

    /// Starts a new note.
    pub fn trigger(&mut self, attack: f32, sustain: f32, decay: f32, punch: f32) {
        self.stage = EnvelopeStage::Attack;
        self.time = 0;
        self.volume = 0.0;
        self.punch = punch;
        self.lengths = [
            stage_length(attack),
            stage_length(sustain),
            stage_length(decay),
        ];
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Samples spent in the current stage.
    pub fn elapsed(&self) -> i32 {
        self.time
    }

    pub fn is_stopped(&self) -> bool {
        self.stage == EnvelopeStage::Stopped
    }

    /// Total number of samples from trigger to `Stopped`.
    pub fn total_length(&self) -> u64 {
        self.lengths.iter().map(|&len| len as u64 + 1).sum()
    }

    /// Advances one sample and returns the volume.
    ///
    /// On the sample that enters `Stopped` the previous volume is held.
    pub fn advance(&mut self) -> f32 {
        let index = match self.stage {
            EnvelopeStage::Attack => 0,
            EnvelopeStage::Sustain => 1,
            EnvelopeStage::Decay => 2,
            EnvelopeStage::Stopped => return self.volume,
        };

        self.time += 1;
        if self.time > self.lengths[index] {
            self.time = 0;
            self.stage = match self.stage {
                EnvelopeStage::Attack => EnvelopeStage::Sustain,
                EnvelopeStage::Sustain => EnvelopeStage::Decay,
                _ => EnvelopeStage::Stopped,
            };
        }

        let t = self.time as f32;
        match self.stage {
            EnvelopeStage::Attack => self.volume = t / self.lengths[0] as f32,
            EnvelopeStage::Sustain => {
                self.volume = 1.0 + (1.0 - t / self.lengths[1] as f32) * 2.0 * self.punch;
            }
            EnvelopeStage::Decay => self.volume = 1.0 - t / self.lengths[2] as f32,
            EnvelopeStage::Stopped => {}
        }
        self.volume
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

fn stage_length(value: f32) -> i32 {
    ((value * value * 100_000.0) as i32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_stopped() {
        let mut env = Envelope::new();
        assert!(env.is_stopped());
        assert_eq!(env.advance(), 0.0);
    }

    #[test]
    fn test_stage_lengths() {
        let mut env = Envelope::new();
        env.trigger(0.125, 0.0, 0.0625, 0.0);
        assert_eq!(env.lengths, [1562, 1, 390]);
        assert_eq!(env.total_length(), 1563 + 2 + 391);
    }

    #[test]
    fn test_attack_ramps_linearly() {
        let mut env = Envelope::new();
        env.trigger(0.0625, 0.0, 0.0, 0.0); // 390 samples
        let first = env.advance();
        assert!((first - 1.0 / 390.0).abs() < 1e-6);
        for _ in 0..4 {
            env.advance();
        }
        assert!((env.advance() - 6.0 / 390.0).abs() < 1e-6);
        assert_eq!(env.stage(), EnvelopeStage::Attack);
    }

    #[test]
    fn test_punch_decays_over_sustain() {
        let mut env = Envelope::new();
        env.trigger(0.0, 0.03125, 0.0, 0.5);
        env.advance(); // attack, 1 sample
        let start = env.advance();
        assert_eq!(env.stage(), EnvelopeStage::Sustain);
        assert!((start - 2.0).abs() < 1e-6, "punch starts at 1 + 2·punch");
        let mut last = start;
        while env.stage() == EnvelopeStage::Sustain {
            let v = env.advance();
            if env.stage() == EnvelopeStage::Sustain {
                assert!(v <= last);
                last = v;
            }
        }
        assert!(last >= 1.0);
    }

    #[test]
    fn test_runs_to_stopped() {
        let mut env = Envelope::new();
        env.trigger(0.01, 0.02, 0.03, 0.0);
        let mut samples = 0;
        while !env.is_stopped() {
            let v = env.advance();
            assert!((0.0..=1.0).contains(&v));
            samples += 1;
        }
        assert_eq!(samples as u64, env.total_length());
    }

    #[test]
    fn test_zero_length_stages_last_one_sample() {
        let mut env = Envelope::new();
        env.trigger(0.0, 0.0, 0.0, 0.0);
        assert_eq!(env.lengths, [1, 1, 1]);
        assert_eq!(env.total_length(), 6);
    }
}
