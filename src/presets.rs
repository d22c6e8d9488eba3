//! Preset generators.
//!
//! Each [`Preset`] is a recipe of randomized assignments that produces a sound
//! in a recognisable category. [`Parameters::randomize`] and
//! [`Parameters::mutate`] cover the remaining editor buttons: a fully random
//! sound and a small nudge of the current one.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use sfxr::{Parameters, Preset};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut params = Parameters::default();
//! params.apply_preset(Preset::PickupCoin, &mut rng);
//! assert!(params.base_frequency >= 0.4);
//! ```

use std::fmt;

use log::debug;
use rand::Rng;

use crate::params::{Parameters, WaveType};
use crate::random::SfxRng;

/// Sound archetypes with a fixed generation recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    PickupCoin,
    LaserShoot,
    Explosion,
    Powerup,
    HitHurt,
    Jump,
    BlipSelect,
}

impl Preset {
    /// All presets in ordinal order.
    pub const ALL: [Preset; 7] = [
        Preset::PickupCoin,
        Preset::LaserShoot,
        Preset::Explosion,
        Preset::Powerup,
        Preset::HitHurt,
        Preset::Jump,
        Preset::BlipSelect,
    ];

    /// Stable integer tag, as used by editor buttons and menus.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Human readable name, e.g. `"pickup/coin"`.
    pub fn name(self) -> &'static str {
        match self {
            Preset::PickupCoin => "pickup/coin",
            Preset::LaserShoot => "laser/shoot",
            Preset::Explosion => "explosion",
            Preset::Powerup => "powerup",
            Preset::HitHurt => "hit/hurt",
            Preset::Jump => "jump",
            Preset::BlipSelect => "blip/select",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl Parameters {
    /// Resets the sound and applies the recipe for `preset`.
    pub fn apply_preset<R: Rng + ?Sized>(&mut self, preset: Preset, rng: &mut R) {
        debug!("generating {preset} preset");
        self.reset();
        match preset {
            Preset::PickupCoin => self.pickup_coin(rng),
            Preset::LaserShoot => self.laser_shoot(rng),
            Preset::Explosion => self.explosion(rng),
            Preset::Powerup => self.powerup(rng),
            Preset::HitHurt => self.hit_hurt(rng),
            Preset::Jump => self.jump(rng),
            Preset::BlipSelect => self.blip_select(rng),
        }
    }

    fn pickup_coin<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.base_frequency = 0.4 + rng.rand_float(0.5);
        self.envelope_attack = 0.0;
        self.envelope_sustain = rng.rand_float(0.1);
        self.envelope_decay = 0.1 + rng.rand_float(0.4);
        self.envelope_punch = 0.3 + rng.rand_float(0.3);
        if rng.coin() {
            self.arpeggio_speed = 0.5 + rng.rand_float(0.2);
            self.arpeggio_mod = 0.2 + rng.rand_float(0.4);
        }
    }

    fn laser_shoot<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.wave_type = WaveType::from_ordinal_lenient(rng.rand_int(2));
        if self.wave_type == WaveType::Sine && rng.coin() {
            self.wave_type = WaveType::from_ordinal_lenient(rng.rand_int(1));
        }
        self.base_frequency = 0.5 + rng.rand_float(0.5);
        self.frequency_limit = (self.base_frequency - 0.2 - rng.rand_float(0.6)).max(0.2);
        self.frequency_ramp = -0.15 - rng.rand_float(0.2);
        if rng.rand_int(2) == 0 {
            self.base_frequency = 0.3 + rng.rand_float(0.6);
            self.frequency_limit = rng.rand_float(0.1);
            self.frequency_ramp = -0.35 - rng.rand_float(0.3);
        }
        if rng.coin() {
            self.duty_cycle = rng.rand_float(0.5);
            self.duty_cycle_ramp = rng.rand_float(0.2);
        } else {
            self.duty_cycle = 0.4 + rng.rand_float(0.5);
            self.duty_cycle_ramp = -rng.rand_float(0.7);
        }
        self.envelope_attack = 0.0;
        self.envelope_sustain = 0.1 + rng.rand_float(0.2);
        self.envelope_decay = rng.rand_float(0.4);
        if rng.coin() {
            self.envelope_punch = rng.rand_float(0.3);
        }
        if rng.rand_int(2) == 0 {
            self.phaser_offset = rng.rand_float(0.2);
            self.phaser_ramp = -rng.rand_float(0.2);
        }
        if rng.coin() {
            self.hpf_cutoff = rng.rand_float(0.3);
        }
    }

    fn explosion<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.wave_type = WaveType::Noise;
        if rng.coin() {
            self.base_frequency = 0.1 + rng.rand_float(0.4);
            self.frequency_ramp = -0.1 + rng.rand_float(0.4);
        } else {
            self.base_frequency = 0.2 + rng.rand_float(0.7);
            self.frequency_ramp = -0.2 - rng.rand_float(0.2);
        }
        self.base_frequency *= self.base_frequency;
        if rng.rand_int(4) == 0 {
            self.frequency_ramp = 0.0;
        }
        if rng.rand_int(2) == 0 {
            self.repeat_speed = 0.3 + rng.rand_float(0.5);
        }
        self.envelope_attack = 0.0;
        self.envelope_sustain = 0.1 + rng.rand_float(0.3);
        self.envelope_decay = rng.rand_float(0.5);
        if rng.rand_int(1) == 0 {
            self.phaser_offset = -0.3 + rng.rand_float(0.9);
            self.phaser_ramp = -rng.rand_float(0.3);
        }
        self.envelope_punch = 0.2 + rng.rand_float(0.6);
        if rng.coin() {
            self.vibrato_strength = rng.rand_float(0.7);
            self.vibrato_speed = rng.rand_float(0.6);
        }
        if rng.rand_int(2) == 0 {
            self.arpeggio_speed = 0.6 + rng.rand_float(0.3);
            self.arpeggio_mod = 0.8 - rng.rand_float(1.6);
        }
    }

    fn powerup<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.coin() {
            self.wave_type = WaveType::Sawtooth;
        } else {
            self.duty_cycle = rng.rand_float(0.6);
        }
        if rng.coin() {
            self.base_frequency = 0.2 + rng.rand_float(0.3);
            self.frequency_ramp = 0.1 + rng.rand_float(0.4);
            self.repeat_speed = 0.4 + rng.rand_float(0.4);
        } else {
            self.base_frequency = 0.2 + rng.rand_float(0.3);
            self.frequency_ramp = 0.05 + rng.rand_float(0.2);
            if rng.coin() {
                self.vibrato_strength = rng.rand_float(0.7);
                self.vibrato_speed = rng.rand_float(0.6);
            }
        }
        self.envelope_attack = 0.0;
        self.envelope_sustain = rng.rand_float(0.4);
        self.envelope_decay = 0.1 + rng.rand_float(0.4);
    }

    fn hit_hurt<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.wave_type = WaveType::from_ordinal_lenient(rng.rand_int(2));
        if self.wave_type == WaveType::Sine {
            self.wave_type = WaveType::Noise;
        }
        if self.wave_type == WaveType::Square {
            self.duty_cycle = rng.rand_float(0.6);
        }
        self.base_frequency = 0.2 + rng.rand_float(0.6);
        self.frequency_ramp = -0.3 - rng.rand_float(0.4);
        self.envelope_attack = 0.0;
        self.envelope_sustain = rng.rand_float(0.1);
        self.envelope_decay = 0.1 + rng.rand_float(0.2);
        if rng.coin() {
            self.hpf_cutoff = rng.rand_float(0.3);
        }
    }

    fn jump<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.wave_type = WaveType::Square;
        self.duty_cycle = rng.rand_float(0.6);
        self.base_frequency = 0.3 + rng.rand_float(0.3);
        self.frequency_ramp = 0.1 + rng.rand_float(0.2);
        self.envelope_attack = 0.0;
        self.envelope_sustain = 0.1 + rng.rand_float(0.3);
        self.envelope_decay = 0.1 + rng.rand_float(0.2);
        if rng.coin() {
            self.hpf_cutoff = rng.rand_float(0.3);
        }
        if rng.coin() {
            self.lpf_cutoff = 1.0 - rng.rand_float(0.6);
        }
    }

    fn blip_select<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.wave_type = WaveType::from_ordinal_lenient(rng.rand_int(1));
        if self.wave_type == WaveType::Square {
            self.duty_cycle = rng.rand_float(0.6);
        }
        self.base_frequency = 0.2 + rng.rand_float(0.4);
        self.envelope_attack = 0.0;
        self.envelope_sustain = 0.1 + rng.rand_float(0.1);
        self.envelope_decay = rng.rand_float(0.2);
        self.hpf_cutoff = 0.1;
    }

    /// Replaces every sound control with a biased random value.
    ///
    /// Powers of uniform draws bias most controls toward small magnitudes.
    /// The wave type, both volumes and the filter switch are left alone.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        debug!("randomizing parameters");
        self.base_frequency = rng.rand_bipolar().powf(2.0);
        if rng.coin() {
            self.base_frequency = rng.rand_bipolar().powf(3.0) + 0.5;
        }
        self.frequency_limit = 0.0;
        self.frequency_ramp = rng.rand_bipolar().powf(5.0);
        // A high note sliding up is inaudible, a low note sliding down is silent
        if self.base_frequency > 0.7 && self.frequency_ramp > 0.2 {
            self.frequency_ramp = -self.frequency_ramp;
        }
        if self.base_frequency < 0.2 && self.frequency_ramp < -0.05 {
            self.frequency_ramp = -self.frequency_ramp;
        }
        self.frequency_delta_ramp = rng.rand_bipolar().powf(3.0);
        self.duty_cycle = rng.rand_bipolar();
        self.duty_cycle_ramp = rng.rand_bipolar().powf(3.0);
        self.vibrato_strength = rng.rand_bipolar().powf(3.0);
        self.vibrato_speed = rng.rand_bipolar();
        self.vibrato_delay = rng.rand_bipolar();
        self.envelope_attack = rng.rand_bipolar().powf(3.0);
        self.envelope_sustain = rng.rand_bipolar().powf(2.0);
        self.envelope_decay = rng.rand_bipolar();
        self.envelope_punch = rng.rand_float(0.8).powf(2.0);
        if self.envelope_attack + self.envelope_sustain + self.envelope_decay < 0.2 {
            self.envelope_sustain += 0.2 + rng.rand_float(0.3);
            self.envelope_decay += 0.2 + rng.rand_float(0.3);
        }
        self.lpf_resonance = rng.rand_bipolar();
        self.lpf_cutoff = 1.0 - rng.rand_float(1.0).powf(3.0);
        self.lpf_cutoff_ramp = rng.rand_bipolar().powf(3.0);
        if self.lpf_cutoff < 0.1 && self.lpf_cutoff_ramp < -0.05 {
            self.lpf_cutoff_ramp = -self.lpf_cutoff_ramp;
        }
        self.hpf_cutoff = rng.rand_float(1.0).powf(5.0);
        self.hpf_cutoff_ramp = rng.rand_bipolar().powf(5.0);
        self.phaser_offset = rng.rand_bipolar().powf(3.0);
        self.phaser_ramp = rng.rand_bipolar().powf(3.0);
        self.repeat_speed = rng.rand_bipolar();
        self.arpeggio_speed = rng.rand_bipolar();
        self.arpeggio_mod = rng.rand_bipolar();
    }

    /// Nudges each sound control by up to ±0.05 with probability one half.
    ///
    /// The frequency limit is never touched and nothing is renormalized, so
    /// repeated mutation can walk values out of their nominal ranges.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        debug!("mutating parameters");
        let fields = [
            &mut self.base_frequency,
            &mut self.frequency_ramp,
            &mut self.frequency_delta_ramp,
            &mut self.duty_cycle,
            &mut self.duty_cycle_ramp,
            &mut self.vibrato_strength,
            &mut self.vibrato_speed,
            &mut self.vibrato_delay,
            &mut self.envelope_attack,
            &mut self.envelope_sustain,
            &mut self.envelope_decay,
            &mut self.envelope_punch,
            &mut self.lpf_resonance,
            &mut self.lpf_cutoff,
            &mut self.lpf_cutoff_ramp,
            &mut self.hpf_cutoff,
            &mut self.hpf_cutoff_ramp,
            &mut self.phaser_offset,
            &mut self.phaser_ramp,
            &mut self.repeat_speed,
            &mut self.arpeggio_speed,
            &mut self.arpeggio_mod,
        ];
        for field in fields {
            if rng.coin() {
                *field += rng.rand_float(0.1) - 0.05;
            }
        }
    }
}
