//! Binary `.sfxr` parameter files.
//!
//! The format is a fixed sequence of little-endian fields with no tags; the
//! leading version number decides which optional fields are present:
//!
//! | field                         | type | present           |
//! |-------------------------------|------|-------------------|
//! | version                       | u32  | always            |
//! | wave type                     | u32  | always            |
//! | sound volume                  | f32  | version 102       |
//! | base frequency, limit, ramp   | f32  | always            |
//! | frequency delta ramp          | f32  | version >= 101    |
//! | duty, duty ramp               | f32  | always            |
//! | vibrato strength, speed, delay| f32  | always            |
//! | attack, sustain, decay, punch | f32  | always            |
//! | filter on                     | u8   | always            |
//! | lpf resonance, cutoff, ramp   | f32  | always            |
//! | hpf cutoff, ramp              | f32  | always            |
//! | phaser offset, ramp           | f32  | always            |
//! | repeat speed                  | f32  | always            |
//! | arpeggio speed, mod           | f32  | version >= 101    |
//!
//! Files are always written at [`VERSION`].

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{FormatError, Result};
use crate::params::{Parameters, WaveType};

/// Version written by [`encode`].
pub const VERSION: u32 = 102;

/// Size in bytes of a file written at [`VERSION`].
pub const ENCODED_LEN: usize = 105;

/// Serializes `params` at the current version.
pub fn encode(params: &Parameters) -> Vec<u8> {
    let mut writer = Writer(Vec::with_capacity(ENCODED_LEN));
    let p = params;

    writer.u32(VERSION);
    writer.u32(p.wave_type.ordinal());
    writer.f32(p.sound_volume);

    writer.f32(p.base_frequency);
    writer.f32(p.frequency_limit);
    writer.f32(p.frequency_ramp);
    writer.f32(p.frequency_delta_ramp);
    writer.f32(p.duty_cycle);
    writer.f32(p.duty_cycle_ramp);

    writer.f32(p.vibrato_strength);
    writer.f32(p.vibrato_speed);
    writer.f32(p.vibrato_delay);

    writer.f32(p.envelope_attack);
    writer.f32(p.envelope_sustain);
    writer.f32(p.envelope_decay);
    writer.f32(p.envelope_punch);

    writer.bool(p.filter_on);
    writer.f32(p.lpf_resonance);
    writer.f32(p.lpf_cutoff);
    writer.f32(p.lpf_cutoff_ramp);
    writer.f32(p.hpf_cutoff);
    writer.f32(p.hpf_cutoff_ramp);

    writer.f32(p.phaser_offset);
    writer.f32(p.phaser_ramp);

    writer.f32(p.repeat_speed);

    writer.f32(p.arpeggio_speed);
    writer.f32(p.arpeggio_mod);

    writer.0
}

/// Parses a parameter file of version 100, 101 or 102.
///
/// Fields missing from older versions keep their [`Parameters::default`]
/// values. An unknown wave type decodes as `Square`. Trailing bytes are
/// ignored.
pub fn decode(bytes: &[u8]) -> Result<Parameters, FormatError> {
    let mut reader = Reader::new(bytes);
    let mut p = Parameters::default();

    let version = reader.u32()?;
    if !(100..=102).contains(&version) {
        return Err(FormatError::UnsupportedVersion(version));
    }

    p.wave_type = WaveType::from_ordinal_lenient(reader.u32()?);
    if version == 102 {
        p.sound_volume = reader.f32()?;
    }

    p.base_frequency = reader.f32()?;
    p.frequency_limit = reader.f32()?;
    p.frequency_ramp = reader.f32()?;
    if version >= 101 {
        p.frequency_delta_ramp = reader.f32()?;
    }
    p.duty_cycle = reader.f32()?;
    p.duty_cycle_ramp = reader.f32()?;

    p.vibrato_strength = reader.f32()?;
    p.vibrato_speed = reader.f32()?;
    p.vibrato_delay = reader.f32()?;

    p.envelope_attack = reader.f32()?;
    p.envelope_sustain = reader.f32()?;
    p.envelope_decay = reader.f32()?;
    p.envelope_punch = reader.f32()?;

    p.filter_on = reader.bool()?;
    p.lpf_resonance = reader.f32()?;
    p.lpf_cutoff = reader.f32()?;
    p.lpf_cutoff_ramp = reader.f32()?;
    p.hpf_cutoff = reader.f32()?;
    p.hpf_cutoff_ramp = reader.f32()?;

    p.phaser_offset = reader.f32()?;
    p.phaser_ramp = reader.f32()?;

    p.repeat_speed = reader.f32()?;

    if version >= 101 {
        p.arpeggio_speed = reader.f32()?;
        p.arpeggio_mod = reader.f32()?;
    }

    Ok(p)
}

/// Reads a parameter file from disk.
pub fn load(path: impl AsRef<Path>) -> Result<Parameters> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let params = decode(&bytes)?;
    debug!("loaded parameters from {}: {params:?}", path.display());
    Ok(params)
}

/// Writes `params` to disk at the current version.
pub fn save(path: impl AsRef<Path>, params: &Parameters) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(params))?;
    debug!("saved parameters to {}", path.display());
    Ok(())
}

struct Writer(Vec<u8>);

impl Writer {
    fn u32(&mut self, value: u32) {
        self.0.extend_from_slice(&value.to_le_bytes());
    }

    fn f32(&mut self, value: f32) {
        self.u32(value.to_bits());
    }

    fn bool(&mut self, value: bool) {
        self.0.push(u8::from(value));
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let chunk = self
            .bytes
            .get(self.offset..self.offset + N)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(FormatError::Truncated {
                offset: self.offset,
                needed: N,
                len: self.bytes.len(),
            })?;
        self.offset += N;
        Ok(chunk)
    }

    fn u32(&mut self) -> Result<u32, FormatError> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    fn f32(&mut self) -> Result<f32, FormatError> {
        self.u32().map(f32::from_bits)
    }

    fn bool(&mut self) -> Result<bool, FormatError> {
        self.take::<1>().map(|[byte]| byte != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> Parameters {
        Parameters {
            wave_type: WaveType::Sawtooth,
            sound_volume: 0.7,
            base_frequency: 0.41,
            frequency_limit: 0.12,
            frequency_ramp: -0.3,
            frequency_delta_ramp: 0.05,
            duty_cycle: 0.2,
            duty_cycle_ramp: -0.1,
            vibrato_strength: 0.3,
            vibrato_speed: 0.4,
            vibrato_delay: 0.6,
            envelope_attack: 0.01,
            envelope_sustain: 0.2,
            envelope_decay: 0.35,
            envelope_punch: 0.45,
            filter_on: true,
            lpf_resonance: 0.5,
            lpf_cutoff: 0.8,
            lpf_cutoff_ramp: -0.02,
            hpf_cutoff: 0.1,
            hpf_cutoff_ramp: 0.03,
            phaser_offset: -0.2,
            phaser_ramp: 0.1,
            repeat_speed: 0.4,
            arpeggio_speed: 0.6,
            arpeggio_mod: -0.3,
            ..Parameters::default()
        }
    }

    #[test]
    fn test_encoded_length() {
        assert_eq!(encode(&Parameters::default()).len(), ENCODED_LEN);
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode(&sample_params());
        assert_eq!(&bytes[0..4], &102u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &0.7f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &0.41f32.to_le_bytes());
        // filter_on follows 16 four-byte fields
        assert_eq!(bytes[4 * 16], 1);
    }

    #[test]
    fn test_decode_reproduces_bits() {
        let p = Parameters {
            base_frequency: f32::from_bits(0x3e99_999a),
            arpeggio_mod: -0.0,
            ..sample_params()
        };
        let decoded = decode(&encode(&p)).unwrap();
        assert_eq!(decoded, p);
        assert_eq!(decoded.arpeggio_mod.to_bits(), (-0.0f32).to_bits());
        assert_eq!(decoded.base_frequency.to_bits(), 0x3e99_999a);
    }

    #[test]
    fn test_reencode_is_identical() {
        let bytes = encode(&sample_params());
        assert_eq!(encode(&decode(&bytes).unwrap()), bytes);
    }

    #[test]
    fn test_master_volume_not_persisted() {
        let p = Parameters {
            master_volume: 0.9,
            ..sample_params()
        };
        let decoded = decode(&encode(&p)).unwrap();
        assert_eq!(decoded.master_volume, Parameters::default().master_volume);
    }

    fn legacy_bytes(version: u32, p: &Parameters) -> Vec<u8> {
        let mut w = Writer(Vec::new());
        w.u32(version);
        w.u32(p.wave_type.ordinal());
        for v in [p.base_frequency, p.frequency_limit, p.frequency_ramp] {
            w.f32(v);
        }
        if version >= 101 {
            w.f32(p.frequency_delta_ramp);
        }
        for v in [
            p.duty_cycle,
            p.duty_cycle_ramp,
            p.vibrato_strength,
            p.vibrato_speed,
            p.vibrato_delay,
            p.envelope_attack,
            p.envelope_sustain,
            p.envelope_decay,
            p.envelope_punch,
        ] {
            w.f32(v);
        }
        w.bool(p.filter_on);
        for v in [
            p.lpf_resonance,
            p.lpf_cutoff,
            p.lpf_cutoff_ramp,
            p.hpf_cutoff,
            p.hpf_cutoff_ramp,
            p.phaser_offset,
            p.phaser_ramp,
            p.repeat_speed,
        ] {
            w.f32(v);
        }
        if version >= 101 {
            w.f32(p.arpeggio_speed);
            w.f32(p.arpeggio_mod);
        }
        w.0
    }

    #[test]
    fn test_decode_version_101() {
        let p = sample_params();
        let bytes = legacy_bytes(101, &p);
        assert_eq!(bytes.len(), ENCODED_LEN - 4);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.sound_volume, Parameters::default().sound_volume);
        assert_eq!(decoded.frequency_delta_ramp, p.frequency_delta_ramp);
        assert_eq!(decoded.arpeggio_mod, p.arpeggio_mod);
        assert_eq!(decoded.repeat_speed, p.repeat_speed);
    }

    #[test]
    fn test_decode_version_100() {
        let p = sample_params();
        let bytes = legacy_bytes(100, &p);
        assert_eq!(bytes.len(), ENCODED_LEN - 16);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.frequency_delta_ramp, 0.0);
        assert_eq!(decoded.arpeggio_speed, 0.0);
        assert_eq!(decoded.arpeggio_mod, 0.0);
        assert_eq!(decoded.duty_cycle, p.duty_cycle);
        assert_eq!(decoded.lpf_cutoff, p.lpf_cutoff);
        assert_eq!(decoded.repeat_speed, p.repeat_speed);
        assert!(decoded.filter_on);
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = encode(&sample_params());
        bytes[0..4].copy_from_slice(&103u32.to_le_bytes());
        assert_eq!(decode(&bytes), Err(FormatError::UnsupportedVersion(103)));

        bytes[0..4].copy_from_slice(&99u32.to_le_bytes());
        assert_eq!(decode(&bytes), Err(FormatError::UnsupportedVersion(99)));
    }

    #[test]
    fn test_truncated_input() {
        let bytes = encode(&sample_params());
        for len in [0, 3, 8, 64, ENCODED_LEN - 1] {
            assert!(
                matches!(decode(&bytes[..len]), Err(FormatError::Truncated { len: l, .. }) if l == len),
                "length {len} should be reported as truncated"
            );
        }
        assert_eq!(
            decode(&bytes[..66]),
            Err(FormatError::Truncated {
                offset: 65,
                needed: 4,
                len: 66
            })
        );
    }

    #[test]
    fn test_unknown_wave_type_is_square() {
        let mut bytes = encode(&sample_params());
        bytes[4..8].copy_from_slice(&9u32.to_le_bytes());
        assert_eq!(decode(&bytes).unwrap().wave_type, WaveType::Square);
    }

    #[test]
    fn test_any_nonzero_filter_byte_is_true() {
        let mut bytes = encode(&Parameters::default());
        bytes[64] = 0xff;
        assert!(decode(&bytes).unwrap().filter_on);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = encode(&sample_params());
        bytes.extend_from_slice(&[1, 2, 3]);
        assert_eq!(decode(&bytes).unwrap(), sample_params());
    }
}
