//! Floating point pull interface for audio sinks.
//!
//! Most hosts (cpal among them) ask for samples in whatever format the device
//! uses. `Signal` exposes a voice as a stream of `f64` samples in `[-1, 1]`
//! that can be converted on the fly; the `i16` path lives on
//! [`Synth::render`](crate::Synth::render).

/// Something that produces one mono sample per call.
///
/// Implemented by [`Synth`](crate::Synth) and
/// [`VoiceRenderer`](crate::VoiceRenderer). An idle voice yields `0.0`.
pub trait Signal {
    /// Generates the next sample, typically between -1.0 and 1.0.
    fn next_sample(&mut self) -> f64;

    /// Fills `buffer` with consecutive samples.
    ///
    /// Default implementation calls `next_sample()` for each element.
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
