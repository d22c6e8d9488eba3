//! The sound designer: the state behind a preset/randomize/mutate UI.
//!
//! A [`Designer`] owns the parameters being edited and the generator that
//! feeds the presets. Attach a [`VoiceHandle`] to hear every change on a
//! live voice; without one it is a pure parameter editor and exporter.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use sfxr::{Designer, Preset, WaveType};
//!
//! let mut designer = Designer::with_rng(rand::rngs::StdRng::seed_from_u64(42));
//! designer.play(Preset::Explosion);
//! assert_eq!(designer.parameters().wave_type, WaveType::Noise);
//! ```

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::codec;
use crate::error::Result;
use crate::params::Parameters;
use crate::presets::Preset;
use crate::realtime::VoiceHandle;

/// Parameter editor with optional live playback.
pub struct Designer<R: Rng = StdRng> {
    params: Parameters,
    rng: R,
    voice: Option<VoiceHandle>,
}

impl Designer<StdRng> {
    /// Creates a designer with default parameters and an entropy-seeded
    /// generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Designer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Designer<R> {
    /// Creates a designer drawing presets, randomization and export noise
    /// from `rng`. A seeded generator reproduces the same sounds.
    pub fn with_rng(rng: R) -> Self {
        Self {
            params: Parameters::default(),
            rng,
            voice: None,
        }
    }

    /// Sends every played sound to `voice`.
    pub fn with_voice(mut self, voice: VoiceHandle) -> Self {
        self.voice = Some(voice);
        self
    }

    /// The sound currently being edited.
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Mutable access for slider-style editing. Changes are heard on the
    /// next [`play_sample`](Self::play_sample).
    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }

    /// Replaces the sound being edited without playing it.
    pub fn set_parameters(&mut self, params: Parameters) {
        self.params = params;
    }

    /// Generates `preset` and plays it.
    pub fn play(&mut self, preset: Preset) -> bool {
        self.params.apply_preset(preset, &mut self.rng);
        self.play_sample()
    }

    /// Randomizes every shaping parameter and plays the result.
    pub fn randomize(&mut self) -> bool {
        self.params.randomize(&mut self.rng);
        self.play_sample()
    }

    /// Nudges the current sound and plays the result.
    pub fn mutate(&mut self) -> bool {
        self.params.mutate(&mut self.rng);
        self.play_sample()
    }

    /// Plays the current parameters on the attached voice.
    ///
    /// Returns `false` when no voice is attached or its queue is full.
    pub fn play_sample(&mut self) -> bool {
        match self.voice.as_mut() {
            Some(voice) => voice.play(self.params),
            None => false,
        }
    }

    /// Renders the current parameters to a WAV file in memory.
    #[cfg(feature = "wav")]
    pub fn export_wav(&mut self, settings: &crate::wav::WavSettings) -> Result<Vec<u8>> {
        let rng = StdRng::seed_from_u64(self.rng.gen_range(0..=u64::MAX));
        crate::wav::export(&self.params, settings, rng)
    }

    /// Replaces the current parameters with a saved file. The master volume
    /// is not stored in files and keeps its current value.
    pub fn load_settings(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut loaded = codec::load(path)?;
        loaded.master_volume = self.params.master_volume;
        self.params = loaded;
        Ok(())
    }

    /// Writes the current parameters to `path` in the `.sfxr` format.
    pub fn save_settings(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::save(path, &self.params)
    }
}
