//! Phaser: the signal mixed with a delayed copy of itself.

const BUFFER_LEN: usize = 1024;
const MASK: usize = BUFFER_LEN - 1;

/// Comb-style phaser backed by a fixed 1024-sample ring buffer.
///
/// The delay (`offset`) can sweep during a note; it is clamped to the buffer
/// length so reads always stay inside the ring.
#[derive(Debug, Clone)]
pub struct Phaser {
    buffer: [f32; BUFFER_LEN],
    write_pos: usize,
    offset: f32,
    offset_sweep: f32,
    delay: usize,
}

impl Phaser {
    pub fn new() -> Self {
        Self {
            buffer: [0.0; BUFFER_LEN],
            write_pos: 0,
            offset: 0.0,
            offset_sweep: 0.0,
            delay: 0,
        }
    }

    /// Clears the buffer and sets up the delay sweep for a new note.
    ///
    /// Both inputs are bipolar; the magnitude is squared and the sign kept.
    pub fn trigger(&mut self, offset: f32, ramp: f32) {
        self.offset = offset.powf(2.0) * 1020.0;
        if offset < 0.0 {
            self.offset = -self.offset;
        }
        self.offset_sweep = ramp.powf(2.0);
        if ramp < 0.0 {
            self.offset_sweep = -self.offset_sweep;
        }
        self.delay = Self::delay_for(self.offset);
        self.write_pos = 0;
        self.buffer.fill(0.0);
    }

    /// Advances the delay sweep; called once per output sample.
    pub fn sweep(&mut self) {
        self.offset += self.offset_sweep;
        self.delay = Self::delay_for(self.offset);
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Writes `input` into the ring and returns it mixed with the delayed tap.
    pub fn process(&mut self, input: f32) -> f32 {
        self.buffer[self.write_pos] = input;
        let read_pos = (self.write_pos + BUFFER_LEN - self.delay) & MASK;
        let output = input + self.buffer[read_pos];
        self.write_pos = (self.write_pos + 1) & MASK;
        output
    }

    fn delay_for(offset: f32) -> usize {
        ((offset as i32).unsigned_abs() as usize).min(MASK)
    }
}

impl Default for Phaser {
    fn default() -> Self {
        Self::new()
    }
}
