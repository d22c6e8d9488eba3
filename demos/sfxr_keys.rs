//! Interactive sound effect designer.
//!
//! Press 1-7 to generate a preset, R to randomize, M to mutate and SPACE to
//! replay the current sound. S saves the parameters to `sound.sfxr`, W
//! exports `sound.wav`. Press Q or ESC to quit.
//!
//! Set `RUST_LOG=debug` to log generated parameters to `sfxr_keys.log`.

mod common;

use anyhow::Result;
use common::{KeyAction, is_quit_key, run_interactive};
use crossterm::{ExecutableCommand, event::KeyCode};
use sfxr::{Designer, Preset, WavSettings, realtime};
use std::io::{Write, stdout};

const SETTINGS_PATH: &str = "sound.sfxr";
const WAV_PATH: &str = "sound.wav";
const LOG_PATH: &str = "sfxr_keys.log";

struct State {
    designer: Designer,
    status: String,
}

impl State {
    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        self.status = match code {
            KeyCode::Char(c @ '1'..='7') => {
                let ordinal = c as u32 - '1' as u32;
                match Preset::from_ordinal(ordinal) {
                    Some(preset) => {
                        self.designer.play(preset);
                        format!("preset {preset}")
                    }
                    None => return Ok(()),
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.designer.randomize();
                "randomized".to_string()
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.designer.mutate();
                "mutated".to_string()
            }
            KeyCode::Char(' ') => {
                self.designer.play_sample();
                "replay".to_string()
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.designer.save_settings(SETTINGS_PATH)?;
                format!("saved {SETTINGS_PATH}")
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                let bytes = self.designer.export_wav(&WavSettings::default())?;
                std::fs::write(WAV_PATH, &bytes)?;
                format!("exported {WAV_PATH} ({} bytes)", bytes.len())
            }
            _ => return Ok(()),
        };
        Ok(())
    }
}

fn draw_ui(state: &State) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;
    write!(stdout, "sfxr | ")?;
    for preset in Preset::ALL {
        write!(stdout, "{}={}  ", preset.ordinal() + 1, preset)?;
    }
    stdout.execute(crossterm::cursor::MoveTo(0, 1))?;
    write!(
        stdout,
        "R=randomize  M=mutate  SPACE=replay  S=save  W=export  Q=quit"
    )?;
    stdout.execute(crossterm::cursor::MoveTo(0, 3))?;
    let params = state.designer.parameters();
    write!(
        stdout,
        "{} | wave {} | base {:.3} | attack {:.3} sustain {:.3} decay {:.3}",
        state.status,
        params.wave_type,
        params.base_frequency,
        params.envelope_attack,
        params.envelope_sustain,
        params.envelope_decay,
    )?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Raw mode garbles stderr, so logs go to a file
    let log_file = std::fs::File::create(LOG_PATH)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let (handle, renderer) = realtime::channel(16);
    let state = State {
        designer: Designer::new().with_voice(handle),
        status: "ready".to_string(),
    };

    run_interactive(renderer, state, |state| draw_ui(state), |state, key_event| {
        if is_quit_key(key_event.code) {
            return Ok(KeyAction::Exit);
        }
        state.handle_key(key_event.code)?;
        draw_ui(state)?;
        Ok(KeyAction::Continue)
    })?;

    println!("\nGoodbye!");
    Ok(())
}
