//! Common utilities for the interactive demos.

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, StreamConfig};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use sfxr::{SAMPLE_RATE, Signal};
use std::io::stdout;
use std::panic;
use std::time::Duration;

/// Key handling result that controls the event loop
pub enum KeyAction {
    /// Continue the event loop
    Continue,
    /// Exit the event loop
    Exit,
}

/// Runs an interactive demo with terminal UI.
///
/// `source` is moved into the audio callback, so the control side talks to
/// it only through whatever channel it was built with. `state` stays on the
/// main thread and is handed to `key_handler` on every key press.
pub fn run_interactive<A, S, F, K>(
    source: A,
    mut state: S,
    initial_ui: F,
    mut key_handler: K,
) -> Result<()>
where
    A: Signal + Send + 'static,
    F: FnOnce(&mut S) -> Result<()>,
    K: FnMut(&mut S, &KeyEvent) -> Result<KeyAction>,
{
    // Setup audio
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No output device available"))?;

    let supported = device.default_output_config()?;
    let mut config: StreamConfig = supported.config();
    config.sample_rate = SampleRate(SAMPLE_RATE);

    // Start audio stream
    let _stream = match supported.sample_format() {
        SampleFormat::F32 => create_audio_stream::<f32, A>(&device, &config, source)?,
        SampleFormat::I16 => create_audio_stream::<i16, A>(&device, &config, source)?,
        SampleFormat::U16 => create_audio_stream::<u16, A>(&device, &config, source)?,
        sample_format => {
            return Err(anyhow::anyhow!(
                "Unsupported sample format: {}",
                sample_format
            ));
        }
    };

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    // Restore the terminal if anything panics
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    initial_ui(&mut state)?;

    loop {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            match key_handler(&mut state, &key_event)? {
                KeyAction::Continue => {}
                KeyAction::Exit => break,
            }
        }
    }

    cleanup_terminal();

    Ok(())
}

/// Creates an audio stream that owns `source` and pulls samples from it.
fn create_audio_stream<T, A>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut source: A,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f64> + cpal::SizedSample,
    A: Signal + Send + 'static,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let value: T = T::from_sample(source.next_sample());
                for s in frame.iter_mut() {
                    *s = value;
                }
            }
        },
        |err| eprintln!("Audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

/// Cleans up terminal state (cursor, alternate screen, raw mode).
fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
