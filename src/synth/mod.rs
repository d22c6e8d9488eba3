//! The single-voice synthesizer.
//!
//! `Synth` turns a [`Parameters`] snapshot into 44.1 kHz mono PCM. Every
//! output sample runs the pitch, duty, envelope and effect sweeps once and
//! then evaluates the oscillator 8 times (supersampling) through the filter
//! and phaser chain, averaging the results.
//!
//! ```text
//! oscillator ──► low-pass ──► high-pass ──► phaser ──► × envelope ──► Σ/8 ──► volume
//! ```
//!
//! The render path is allocation free: all state, including the phaser ring
//! buffer and noise table, lives inline in the struct.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use sfxr::{Parameters, Synth};
//!
//! let mut synth = Synth::with_rng(rand::rngs::StdRng::seed_from_u64(1));
//! synth.set_parameters(Parameters::default());
//! synth.play_sample();
//!
//! let mut buffer = [0i16; 512];
//! let written = synth.render(&mut buffer);
//! assert_eq!(written, 512);
//! ```

mod envelope;
mod filter;
mod noise;
mod phaser;

pub use envelope::{Envelope, EnvelopeStage};
pub use filter::FilterPair;
pub use noise::{NOISE_LEN, NoiseTable};
pub use phaser::Phaser;

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::{Parameters, WaveType};
use crate::signal::Signal;

/// Native output rate of the synthesizer in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Oscillator evaluations averaged into each output sample.
const SUPERSAMPLES: usize = 8;
/// Scale from `[-1, 1]` to 16-bit PCM.
const PCM_SCALE: f32 = 32_000.0;
/// Extra gain applied when exporting to a file.
const EXPORT_GAIN: f32 = 4.0;
/// Shortest oscillator period in supersamples.
const MIN_PERIOD: i32 = 8;

/// Single-voice sound effect synthesizer.
///
/// The generator `R` is only used to fill the noise table, so a seeded `R`
/// makes rendering fully deterministic.
pub struct Synth<R: Rng = StdRng> {
    params: Parameters,
    // Snapshot the current note was started from; the render path reads only this
    run: Parameters,
    rng: R,
    playing: bool,

    // Oscillator
    phase: i32,
    period: i32,
    base_period: f64,
    max_period: f64,
    slide: f64,
    delta_slide: f64,
    square_duty: f32,
    duty_slide: f32,

    // Vibrato
    vibrato_phase: f32,
    vibrato_speed: f32,
    vibrato_amplitude: f32,

    // Auto-repeat and arpeggio counters
    repeat_time: i32,
    repeat_limit: i32,
    arpeggio_time: i32,
    arpeggio_limit: i32,
    arpeggio_multiplier: f64,

    envelope: Envelope,
    filters: FilterPair,
    phaser: Phaser,
    noise: NoiseTable,
}

impl Synth<StdRng> {
    /// Creates a silent synthesizer seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Synth<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Synth<R> {
    /// Creates a silent synthesizer drawing noise from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            params: Parameters::default(),
            run: Parameters::default(),
            rng,
            playing: false,
            phase: 0,
            period: MIN_PERIOD,
            base_period: MIN_PERIOD as f64,
            max_period: MIN_PERIOD as f64,
            slide: 1.0,
            delta_slide: 0.0,
            square_duty: 0.5,
            duty_slide: 0.0,
            vibrato_phase: 0.0,
            vibrato_speed: 0.0,
            vibrato_amplitude: 0.0,
            repeat_time: 0,
            repeat_limit: 0,
            arpeggio_time: 0,
            arpeggio_limit: 0,
            arpeggio_multiplier: 1.0,
            envelope: Envelope::new(),
            filters: FilterPair::new(),
            phaser: Phaser::new(),
            noise: NoiseTable::new(),
        }
    }

    /// Parameters the next note will be started from.
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Replaces the parameter snapshot.
    ///
    /// A note already playing keeps the snapshot it was started with; the new
    /// values are heard from the next [`play_sample`](Self::play_sample).
    pub fn set_parameters(&mut self, params: Parameters) {
        self.params = params;
    }

    /// Whether a note is sounding. Becomes `false` once the envelope ends,
    /// the pitch passes the frequency limit, or [`stop`](Self::stop) is called.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Silences the voice immediately.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Starts a new note from the current parameters, superseding any note
    /// already playing.
    pub fn play_sample(&mut self) {
        self.reset(false);
        self.playing = true;
    }

    /// Sets `params` and starts a note.
    pub fn play(&mut self, params: Parameters) {
        self.set_parameters(params);
        self.play_sample();
    }

    /// Re-derives run state from the parameters.
    ///
    /// Pitch, duty and arpeggio state are always recomputed. A fresh note
    /// (`restart == false`) first takes a new snapshot of the parameters and
    /// additionally resets the phase, filters, vibrato, envelope, phaser,
    /// noise table and repeat timer; an auto-repeat (`restart == true`)
    /// reuses the running snapshot and leaves those running.
    pub fn reset(&mut self, restart: bool) {
        if !restart {
            self.run = self.params;
            self.phase = 0;
        }
        let p = self.run;

        // powf rather than powi keeps rounding identical to classic sfxr
        let base = p.base_frequency as f64;
        self.base_period = 100.0 / (base * base + 0.001);
        self.period = self.base_period as i32;
        let limit = p.frequency_limit as f64;
        self.max_period = 100.0 / (limit * limit + 0.001);
        self.slide = 1.0 - (p.frequency_ramp as f64).powf(3.0) * 0.01;
        self.delta_slide = -(p.frequency_delta_ramp as f64).powf(3.0) * 0.000001;

        self.square_duty = 0.5 - p.duty_cycle * 0.5;
        self.duty_slide = -p.duty_cycle_ramp * 0.00005;

        self.arpeggio_multiplier = if p.arpeggio_mod >= 0.0 {
            1.0 - (p.arpeggio_mod as f64).powf(2.0) * 0.9
        } else {
            1.0 + (p.arpeggio_mod as f64).powf(2.0) * 10.0
        };
        self.arpeggio_time = 0;
        self.arpeggio_limit = if p.arpeggio_speed == 1.0 {
            0
        } else {
            ((1.0 - p.arpeggio_speed).powf(2.0) * 20000.0 + 32.0) as i32
        };

        if restart {
            return;
        }

        self.filters.trigger(&p);

        self.vibrato_phase = 0.0;
        self.vibrato_speed = p.vibrato_speed.powf(2.0) * 0.01;
        self.vibrato_amplitude = p.vibrato_strength * 0.5;

        self.envelope.trigger(
            p.envelope_attack,
            p.envelope_sustain,
            p.envelope_decay,
            p.envelope_punch,
        );

        self.phaser.trigger(p.phaser_offset, p.phaser_ramp);
        self.noise.refill(&mut self.rng);

        self.repeat_time = 0;
        self.repeat_limit = if p.repeat_speed == 0.0 {
            0
        } else {
            ((1.0 - p.repeat_speed).powf(2.0) * 20000.0 + 32.0) as i32
        };
    }

    /// Renders real-time PCM into `out`.
    ///
    /// Returns the number of frames synthesized. If the voice stops (or was
    /// never started) the remainder of `out` is filled with silence.
    pub fn render(&mut self, out: &mut [i16]) -> usize {
        let mut written = 0;
        for slot in out.iter_mut() {
            let Some(sample) = self.next_frame() else {
                break;
            };
            *slot = (sample.clamp(-1.0, 1.0) * PCM_SCALE) as i16;
            written += 1;
        }
        out[written..].fill(0);
        written
    }

    /// Renders export-mode samples in `[-1, 1]` into `out`.
    ///
    /// Export mode adds a fixed gain before clipping and, through `state`,
    /// decimates to the target sample rate. Returns the number of samples
    /// written; fewer than `out.len()` means the voice has stopped.
    pub fn render_export(&mut self, out: &mut [f32], state: &mut ExportState) -> usize {
        let mut written = 0;
        while written < out.len() {
            let Some(sample) = self.next_frame() else {
                break;
            };
            let sample = (sample * EXPORT_GAIN).clamp(-1.0, 1.0);
            if let Some(value) = state.push(sample) {
                out[written] = value;
                written += 1;
            }
        }
        written
    }

    /// Synthesizes one output frame, or `None` if the voice is idle.
    ///
    /// The returned value has volume applied but is not clipped.
    fn next_frame(&mut self) -> Option<f32> {
        if !self.playing {
            return None;
        }

        self.repeat_time = self.repeat_time.saturating_add(1);
        if self.repeat_limit != 0 && self.repeat_time >= self.repeat_limit {
            self.repeat_time = 0;
            self.reset(true);
        }

        self.arpeggio_time = self.arpeggio_time.saturating_add(1);
        if self.arpeggio_limit != 0 && self.arpeggio_time >= self.arpeggio_limit {
            self.arpeggio_limit = 0;
            self.base_period *= self.arpeggio_multiplier;
        }

        self.slide += self.delta_slide;
        self.base_period *= self.slide;
        if self.base_period > self.max_period {
            self.base_period = self.max_period;
            if self.run.frequency_limit > 0.0 {
                self.playing = false;
            }
        }

        let mut period = self.base_period;
        if self.vibrato_amplitude > 0.0 {
            self.vibrato_phase += self.vibrato_speed;
            period *= (1.0 + self.vibrato_phase.sin() * self.vibrato_amplitude) as f64;
        }
        self.period = (period as i32).max(MIN_PERIOD);

        self.square_duty = (self.square_duty + self.duty_slide).clamp(0.0, 0.5);

        let volume = self.envelope.advance();
        if self.envelope.is_stopped() {
            self.playing = false;
        }

        self.phaser.sweep();
        self.filters.sweep_highpass();

        let mut accumulator = 0.0;
        for _ in 0..SUPERSAMPLES {
            self.phase += 1;
            if self.phase >= self.period {
                self.phase %= self.period;
                if self.run.wave_type == WaveType::Noise {
                    self.noise.refill(&mut self.rng);
                }
            }

            let raw = self.oscillator();
            let filtered = self.filters.process(raw);
            let sample = self.phaser.process(filtered);
            accumulator += sample * volume;
        }

        let sample = accumulator / SUPERSAMPLES as f32 * self.run.master_volume;
        Some(sample * 2.0 * self.run.sound_volume)
    }

    /// Raw waveform at the current phase.
    fn oscillator(&self) -> f32 {
        let fp = self.phase as f32 / self.period as f32;
        match self.run.wave_type {
            WaveType::Square => {
                if fp < self.square_duty {
                    0.5
                } else {
                    -0.5
                }
            }
            WaveType::Sawtooth => 1.0 - fp * 2.0,
            WaveType::Sine => (fp * 2.0 * PI).sin(),
            WaveType::Noise => self.noise.sample(self.phase, self.period),
        }
    }
}

impl<R: Rng> Signal for Synth<R> {
    fn next_sample(&mut self) -> f64 {
        self.next_frame()
            .map_or(0.0, |sample| sample.clamp(-1.0, 1.0) as f64)
    }
}

/// Accumulator for export-mode output.
///
/// At the native rate every frame passes straight through; at any other rate
/// consecutive pairs are averaged into one output sample.
#[derive(Debug, Clone)]
pub struct ExportState {
    decimate: bool,
    accumulator: f32,
    count: u32,
}

impl ExportState {
    /// Creates an accumulator for output at `sample_rate` Hz. Any rate other
    /// than [`SAMPLE_RATE`] halves the output.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            decimate: sample_rate != SAMPLE_RATE,
            accumulator: 0.0,
            count: 0,
        }
    }

    fn push(&mut self, sample: f32) -> Option<f32> {
        self.accumulator += sample;
        self.count += 1;
        if !self.decimate || self.count == 2 {
            let value = self.accumulator / self.count as f32;
            self.accumulator = 0.0;
            self.count = 0;
            Some(value)
        } else {
            None
        }
    }
}
