//! Lock-free handoff between a control thread and the audio callback.
//!
//! The [`Synth`] is moved into a [`VoiceRenderer`] that lives on the audio
//! thread. The control side keeps a [`VoiceHandle`] and sends whole
//! parameter snapshots through a single-producer single-consumer ring
//! buffer. Commands are applied at the start of each render call, so a new
//! snapshot always takes effect at a note boundary and the audio thread
//! never blocks or allocates.
//!
//! # Examples
//!
//! ```
//! use sfxr::{Parameters, realtime};
//!
//! let (mut handle, mut renderer) = realtime::channel(8);
//! assert!(handle.play(Parameters::default()));
//!
//! // On the audio thread:
//! let mut buffer = [0i16; 256];
//! assert_eq!(renderer.render(&mut buffer), 256);
//! ```

use log::warn;
use rand::Rng;
use rand::rngs::StdRng;
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::params::Parameters;
use crate::signal::Signal;
use crate::synth::Synth;

/// A request from the control side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoiceCommand {
    /// Replace the parameters and start a new note.
    Play(Parameters),
    /// Silence the voice.
    Stop,
}

/// Creates a connected handle/renderer pair around a new [`Synth`].
///
/// `capacity` is the number of commands that can be queued before the audio
/// thread picks them up.
pub fn channel(capacity: usize) -> (VoiceHandle, VoiceRenderer) {
    channel_with_synth(capacity, Synth::new())
}

/// Like [`channel`], but wraps an existing synthesizer.
pub fn channel_with_synth<R: Rng>(
    capacity: usize,
    synth: Synth<R>,
) -> (VoiceHandle, VoiceRenderer<R>) {
    let (producer, consumer) = HeapRb::<VoiceCommand>::new(capacity.max(1)).split();
    (
        VoiceHandle { producer },
        VoiceRenderer { synth, consumer },
    )
}

/// Control-side end of the channel.
pub struct VoiceHandle {
    producer: HeapProd<VoiceCommand>,
}

impl VoiceHandle {
    /// Queues `params` to be played. Returns `false` if the queue was full.
    pub fn play(&mut self, params: Parameters) -> bool {
        self.send(VoiceCommand::Play(params))
    }

    /// Queues a stop. Returns `false` if the queue was full.
    pub fn stop(&mut self) -> bool {
        self.send(VoiceCommand::Stop)
    }

    /// Queues `command`. Returns `false` and drops it if the queue was full.
    pub fn send(&mut self, command: VoiceCommand) -> bool {
        match self.producer.try_push(command) {
            Ok(()) => true,
            Err(dropped) => {
                warn!("voice command queue full, dropping {dropped:?}");
                false
            }
        }
    }
}

/// Audio-thread end of the channel. Owns the synthesizer.
pub struct VoiceRenderer<R: Rng = StdRng> {
    synth: Synth<R>,
    consumer: HeapCons<VoiceCommand>,
}

impl<R: Rng> VoiceRenderer<R> {
    /// Applies every queued command in order.
    pub fn pump(&mut self) {
        while let Some(command) = self.consumer.try_pop() {
            match command {
                VoiceCommand::Play(params) => self.synth.play(params),
                VoiceCommand::Stop => self.synth.stop(),
            }
        }
    }

    /// Applies pending commands, then renders like [`Synth::render`].
    pub fn render(&mut self, out: &mut [i16]) -> usize {
        self.pump();
        self.synth.render(out)
    }

    /// Whether the owned voice is sounding, as of the last render.
    pub fn is_playing(&self) -> bool {
        self.synth.is_playing()
    }

    /// The owned synthesizer, for inspection.
    pub fn synth(&self) -> &Synth<R> {
        &self.synth
    }
}

impl<R: Rng> Signal for VoiceRenderer<R> {
    fn next_sample(&mut self) -> f64 {
        self.pump();
        self.synth.next_sample()
    }

    fn process(&mut self, buffer: &mut [f64]) {
        self.pump();
        for sample in buffer.iter_mut() {
            *sample = self.synth.next_sample();
        }
    }
}
