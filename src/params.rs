//! Synthesis parameters.
//!
//! `Parameters` is the complete description of one sound effect. It is a plain
//! value type: editors, presets and the file codec all produce one, and the
//! synthesizer copies a snapshot of it every time a note starts.

use std::fmt;

/// Base waveform of the oscillator.
///
/// The ordinal values are persisted in `.sfxr` files and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveType {
    /// Pulse wave with variable duty cycle
    #[default]
    Square,
    /// Falling ramp
    Sawtooth,
    /// Pure sine
    Sine,
    /// Sample-and-hold noise from a 32-entry table
    Noise,
}

impl WaveType {
    /// All wave types in ordinal order.
    pub const ALL: [WaveType; 4] = [
        WaveType::Square,
        WaveType::Sawtooth,
        WaveType::Sine,
        WaveType::Noise,
    ];

    /// Stable integer tag used by the file format.
    pub fn ordinal(self) -> u32 {
        match self {
            WaveType::Square => 0,
            WaveType::Sawtooth => 1,
            WaveType::Sine => 2,
            WaveType::Noise => 3,
        }
    }

    /// Maps a stored tag back to a wave type, or `None` if it is unknown.
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Like [`WaveType::from_ordinal`], but unknown tags fall back to `Square`.
    pub fn from_ordinal_lenient(ordinal: u32) -> Self {
        Self::from_ordinal(ordinal).unwrap_or_default()
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaveType::Square => "square",
            WaveType::Sawtooth => "sawtooth",
            WaveType::Sine => "sine",
            WaveType::Noise => "noise",
        };
        f.write_str(name)
    }
}

/// Every control of a sound effect.
///
/// Unipolar fields nominally live in `[0, 1]`, bipolar ones in `[-1, 1]`.
/// Nothing here is range checked: `mutate()` and hand-edited files can push
/// values outside those ranges and the synthesizer clamps internally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub wave_type: WaveType,

    pub sound_volume: f32,
    pub master_volume: f32,

    pub base_frequency: f32,
    /// Lowest frequency before the note cuts off (0 = no limit)
    pub frequency_limit: f32,
    pub frequency_ramp: f32,       // bipolar
    pub frequency_delta_ramp: f32, // bipolar

    pub duty_cycle: f32,
    pub duty_cycle_ramp: f32, // bipolar

    pub vibrato_strength: f32,
    pub vibrato_speed: f32,
    /// Stored for file compatibility; the synthesizer does not use it.
    pub vibrato_delay: f32,

    pub envelope_attack: f32,
    pub envelope_sustain: f32,
    pub envelope_decay: f32,
    pub envelope_punch: f32,

    /// Stored for file compatibility; the filters are always in the chain.
    pub filter_on: bool,
    pub lpf_resonance: f32,
    /// Low-pass cutoff; exactly 1.0 bypasses the low-pass stage
    pub lpf_cutoff: f32,
    pub lpf_cutoff_ramp: f32, // bipolar
    pub hpf_cutoff: f32,
    pub hpf_cutoff_ramp: f32, // bipolar

    pub phaser_offset: f32, // bipolar
    pub phaser_ramp: f32,   // bipolar

    /// Auto-repeat rate (0 = no repeat)
    pub repeat_speed: f32,

    /// Time until the arpeggio jump (1.0 = disabled)
    pub arpeggio_speed: f32,
    pub arpeggio_mod: f32, // bipolar
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            wave_type: WaveType::Square,
            sound_volume: 0.5,
            master_volume: 0.05,
            base_frequency: 0.3,
            frequency_limit: 0.0,
            frequency_ramp: 0.0,
            frequency_delta_ramp: 0.0,
            duty_cycle: 0.0,
            duty_cycle_ramp: 0.0,
            vibrato_strength: 0.0,
            vibrato_speed: 0.0,
            vibrato_delay: 0.0,
            envelope_attack: 0.0,
            envelope_sustain: 0.3,
            envelope_decay: 0.4,
            envelope_punch: 0.0,
            filter_on: false,
            lpf_resonance: 0.0,
            lpf_cutoff: 1.0,
            lpf_cutoff_ramp: 0.0,
            hpf_cutoff: 0.0,
            hpf_cutoff_ramp: 0.0,
            phaser_offset: 0.0,
            phaser_ramp: 0.0,
            repeat_speed: 0.0,
            arpeggio_speed: 0.0,
            arpeggio_mod: 0.0,
        }
    }
}

impl Parameters {
    /// Restores the sound controls to their defaults.
    ///
    /// The two volume controls belong to the mixer rather than the sound, so
    /// they keep their current values.
    pub fn reset(&mut self) {
        *self = Self {
            sound_volume: self.sound_volume,
            master_volume: self.master_volume,
            ..Self::default()
        };
    }
}
