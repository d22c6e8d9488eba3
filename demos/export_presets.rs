//! Renders one WAV file per preset into a directory.
//!
//! Usage: `cargo run --example export_presets [OUT_DIR] [SEED]`
//!
//! Set `RUST_LOG=debug` to see the generated parameters.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sfxr::{Parameters, Preset, WavSettings, codec, wav};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "sfx".to_string()));
    let seed = match args.next() {
        Some(seed) => seed.parse().context("seed must be an integer")?,
        None => 0,
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let settings = WavSettings::default();

    for preset in Preset::ALL {
        let mut params = Parameters::default();
        params.apply_preset(preset, &mut rng);

        let stem = preset.name().replace('/', "_");
        let wav_path = out_dir.join(format!("{stem}.wav"));
        let bytes = wav::export(&params, &settings, StdRng::seed_from_u64(seed))?;
        std::fs::write(&wav_path, &bytes)
            .with_context(|| format!("writing {}", wav_path.display()))?;

        codec::save(out_dir.join(format!("{stem}.sfxr")), &params)?;
        println!("{preset:>14}: {} ({} bytes)", wav_path.display(), bytes.len());
    }

    Ok(())
}
