//! sfxr - Retro sound effect synthesis for Rust
//!
//! This library generates the bleeps, blips and explosions of classic games
//! from a flat set of synthesis parameters. Presets and randomization produce
//! parameter sets, a single-voice synthesizer renders them, and the results
//! can be stored as `.sfxr` parameter files or exported as WAV.
//!
//! ```
//! use rand::SeedableRng;
//! use sfxr::{Parameters, Preset, Synth};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut params = Parameters::default();
//! params.apply_preset(Preset::PickupCoin, &mut rng);
//!
//! let mut synth = Synth::with_rng(rng);
//! synth.play(params);
//! let mut buffer = [0i16; 1024];
//! synth.render(&mut buffer);
//! ```

pub mod codec;
pub mod designer;
pub mod error;
pub mod params;
pub mod presets;
pub mod random;
pub mod realtime;
pub mod signal;
pub mod synth;
#[cfg(feature = "wav")]
pub mod wav;

// Re-export commonly used types at the crate root
pub use designer::Designer;
pub use error::{Error, FormatError, Result};
pub use params::{Parameters, WaveType};
pub use presets::Preset;
pub use random::SfxRng;
pub use realtime::{VoiceCommand, VoiceHandle, VoiceRenderer};
pub use signal::Signal;
pub use synth::{ExportState, SAMPLE_RATE, Synth};
#[cfg(feature = "wav")]
pub use wav::WavSettings;
