//! WAV export.
//!
//! Renders a sound from a freshly started voice until it ends and packages
//! the result as a mono PCM RIFF/WAVE file. `hound` writes the header and
//! patches the RIFF and `data` chunk sizes once the sample count is known.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use sfxr::{Parameters, WavSettings, wav};
//!
//! let rng = rand::rngs::StdRng::seed_from_u64(3);
//! let bytes = wav::export(&Parameters::default(), &WavSettings::default(), rng).unwrap();
//! assert_eq!(&bytes[0..4], b"RIFF");
//! assert_eq!(&bytes[8..12], b"WAVE");
//! ```

use std::io::{Cursor, Seek, Write};

use log::debug;
use rand::Rng;

use crate::error::{Error, Result};
use crate::params::Parameters;
use crate::synth::{ExportState, SAMPLE_RATE, Synth};

/// Upper bound on exported samples; ten minutes at the native rate.
pub const MAX_EXPORT_FRAMES: usize = SAMPLE_RATE as usize * 600;

/// Output format of an export.
///
/// # Examples
///
/// ```
/// use sfxr::WavSettings;
///
/// let settings = WavSettings::default()
///     .with_sample_rate(22_050)
///     .with_bits_per_sample(8);
/// assert_eq!(settings.sample_rate, 22_050);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSettings {
    /// 44100 (native) or 22050 (every two frames averaged into one)
    pub sample_rate: u32,
    /// 16 (signed) or 8 (unsigned)
    pub bits_per_sample: u16,
}

impl Default for WavSettings {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
        }
    }
}

impl WavSettings {
    /// Sets the output rate. Only 44100 and 22050 are accepted by
    /// [`export`].
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the sample width. Only 16 and 8 are accepted by [`export`].
    pub fn with_bits_per_sample(mut self, bits_per_sample: u16) -> Self {
        self.bits_per_sample = bits_per_sample;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.sample_rate != SAMPLE_RATE && self.sample_rate != SAMPLE_RATE / 2 {
            return Err(Error::UnsupportedSampleRate(self.sample_rate));
        }
        if self.bits_per_sample != 16 && self.bits_per_sample != 8 {
            return Err(Error::UnsupportedBitDepth(self.bits_per_sample));
        }
        Ok(())
    }

    fn spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        }
    }
}

/// Renders `params` and returns the complete WAV file.
///
/// `rng` feeds the noise table, so a seeded generator gives identical files.
pub fn export<R: Rng>(params: &Parameters, settings: &WavSettings, rng: R) -> Result<Vec<u8>> {
    export_with_limit(params, settings, rng, MAX_EXPORT_FRAMES)
}

/// Renders `params` into `writer` as a WAV file.
pub fn write<W, R>(writer: W, params: &Parameters, settings: &WavSettings, rng: R) -> Result<usize>
where
    W: Write + Seek,
    R: Rng,
{
    write_with_limit(writer, params, settings, rng, MAX_EXPORT_FRAMES)
}

pub(crate) fn export_with_limit<R: Rng>(
    params: &Parameters,
    settings: &WavSettings,
    rng: R,
    limit: usize,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_with_limit(Cursor::new(&mut bytes), params, settings, rng, limit)?;
    Ok(bytes)
}

fn write_with_limit<W, R>(
    writer: W,
    params: &Parameters,
    settings: &WavSettings,
    rng: R,
    limit: usize,
) -> Result<usize>
where
    W: Write + Seek,
    R: Rng,
{
    settings.validate()?;

    let mut synth = Synth::with_rng(rng);
    synth.play(*params);

    let mut wav = hound::WavWriter::new(writer, settings.spec())?;
    let mut state = ExportState::new(settings.sample_rate);
    let mut buffer = [0.0f32; 256];
    let mut frames = 0;

    while synth.is_playing() {
        let written = synth.render_export(&mut buffer, &mut state);
        frames += written;
        if frames > limit {
            return Err(Error::FrameLimit { limit });
        }
        for &sample in &buffer[..written] {
            if settings.bits_per_sample == 16 {
                wav.write_sample((sample * 32_000.0) as i16)?;
            } else {
                // hound stores 8-bit as unsigned with a +128 offset
                wav.write_sample((sample * 127.0) as i8)?;
            }
        }
    }
    wav.finalize()?;

    debug!(
        "exported {frames} frames at {} Hz, {}-bit",
        settings.sample_rate, settings.bits_per_sample
    );
    Ok(frames)
}
