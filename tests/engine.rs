use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::mock::StepRng;
use sfxr::{Parameters, Preset, Synth, WaveType};

const FRAME_CAP: usize = 5_000_000;

fn render_to_end<R: rand::Rng>(synth: &mut Synth<R>) -> Vec<i16> {
    let mut out = Vec::new();
    let mut buffer = [0i16; 512];
    loop {
        let n = synth.render(&mut buffer);
        out.extend_from_slice(&buffer[..n]);
        assert!(out.len() < FRAME_CAP, "voice never stopped");
        if n < buffer.len() {
            return out;
        }
    }
}

#[test]
fn test_seeded_render_is_deterministic() {
    for preset in Preset::ALL {
        let mut params = Parameters::default();
        params.apply_preset(preset, &mut StdRng::seed_from_u64(11));

        let mut a = Synth::with_rng(StdRng::seed_from_u64(99));
        let mut b = Synth::with_rng(StdRng::seed_from_u64(99));
        a.play(params);
        b.play(params);
        assert_eq!(render_to_end(&mut a), render_to_end(&mut b), "{preset}");
    }
}

#[test]
fn test_voice_terminates_within_envelope_bound() {
    let cases = [
        (0.0, 0.3, 0.4),
        (0.2, 0.1, 0.5),
        (0.5, 0.5, 0.5),
        (0.05, 0.0, 0.0),
    ];
    for (attack, sustain, decay) in cases {
        let params = Parameters {
            envelope_attack: attack,
            envelope_sustain: sustain,
            envelope_decay: decay,
            ..Parameters::default()
        };
        let mut synth = Synth::with_rng(StdRng::seed_from_u64(1));
        synth.play(params);
        let frames = render_to_end(&mut synth).len();

        let total = (attack + sustain + decay) as f64;
        let bound = (total * total * 100_000.0) as usize + 6;
        assert!(frames > 0);
        assert!(frames <= bound, "{frames} frames exceeds {bound}");
        assert!(!synth.is_playing());
    }
}

#[test]
fn test_silence_before_play_and_after_stop() {
    let mut synth = Synth::with_rng(StdRng::seed_from_u64(2));
    let mut buffer = [1i16; 256];
    assert_eq!(synth.render(&mut buffer), 0);
    assert!(buffer.iter().all(|&s| s == 0));

    synth.play(Parameters::default());
    render_to_end(&mut synth);

    buffer.fill(1);
    assert_eq!(synth.render(&mut buffer), 0);
    assert!(buffer.iter().all(|&s| s == 0));

    synth.play_sample();
    synth.stop();
    assert_eq!(synth.render(&mut buffer), 0);
}

#[test]
fn test_square_wave_scenario() {
    let params = Parameters {
        wave_type: WaveType::Square,
        base_frequency: 0.3,
        duty_cycle: 0.0,
        envelope_attack: 0.0,
        envelope_sustain: 0.3,
        envelope_decay: 0.4,
        ..Parameters::default()
    };
    let mut synth = Synth::with_rng(StdRng::seed_from_u64(3));
    synth.play(params);

    let mut window = vec![0i16; 4410];
    assert_eq!(synth.render(&mut window), 4410);

    // Default volumes keep the first sample far below full scale
    assert!(window[0].unsigned_abs() < 3200, "first sample {}", window[0]);

    let sum: f64 = window.iter().map(|&s| (s as f64).powi(2)).sum();
    let rms = (sum / window.len() as f64).sqrt();
    assert!(rms > 0.0);
    assert!(rms < 32_000.0);
}

#[test]
fn test_presets_with_minimum_draws() {
    for preset in Preset::ALL {
        let mut params = Parameters::default();
        params.apply_preset(preset, &mut StepRng::new(0, 0));
        assert!(WaveType::ALL.contains(&params.wave_type));

        let mut synth = Synth::with_rng(StepRng::new(0, 0));
        synth.play(params);
        assert!(synth.is_playing(), "{preset} did not start");
        render_to_end(&mut synth);
        assert!(!synth.is_playing(), "{preset} did not stop");
    }
}

#[test]
fn test_randomized_sounds_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..10 {
        let mut params = Parameters::default();
        params.randomize(&mut rng);
        params.mutate(&mut rng);

        let mut synth = Synth::with_rng(StdRng::seed_from_u64(4));
        synth.play(params);
        for sample in render_to_end(&mut synth) {
            assert!((-32_000..=32_000).contains(&sample));
        }
    }
}
