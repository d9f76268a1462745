/// Plucked string model - a circular buffer run through a leaky two-tap averaging filter
use crate::error::{Error, Result};

/// Displacement written into the buffer by a pluck. The first half of the
/// buffer gets `+PLUCK_AMPLITUDE`, the second half the negated value.
pub const PLUCK_AMPLITUDE: f32 = 0.05;

/// Energy kept each time a slot is rewritten by the averaging filter.
pub const DECAY: f32 = 0.995;

#[derive(Debug, Clone, PartialEq)]
pub struct ResonantString {
    samples: Box<[f32]>,
    cursor: usize,
    frequency: f32,
}

impl ResonantString {
    /// Builds a silent string tuned to `frequency` at `sample_rate`.
    ///
    /// The buffer length is `sample_rate / frequency`, truncated. Any frequency
    /// strictly between zero and the sample rate is accepted.
    pub fn new(frequency: f32, sample_rate: u32) -> Result<Self> {
        // written so that NaN falls into the error branch
        if !(frequency > 0.0 && frequency < sample_rate as f32) {
            return Err(Error::invalid(format!(
                "string frequency {frequency} Hz must lie in (0, {sample_rate}) Hz"
            )));
        }

        let length = (f64::from(sample_rate) / f64::from(frequency)) as usize;

        Ok(Self {
            samples: vec![0.0; length.max(1)].into_boxed_slice(),
            cursor: 0,
            frequency,
        })
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Number of samples in one period of the string.
    pub fn buffer_len(&self) -> usize {
        self.samples.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Resets the waveform to a step: `+A` on `[0, len/2)`, `-A` on `[len/2, len)`.
    /// For odd lengths the middle slot lands in the negative half.
    pub fn pluck(&mut self) {
        let split = self.samples.len() / 2;
        let (front, back) = self.samples.split_at_mut(split);
        front.fill(PLUCK_AMPLITUDE);
        back.fill(-PLUCK_AMPLITUDE);
        self.cursor = 0;
    }

    /// Emits the sample under the cursor, then replaces that slot with the damped
    /// average of itself and its successor and advances the cursor.
    ///
    /// Constant time, no allocation. Safe to call from the audio callback.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let len = self.samples.len();
        let next = (self.cursor + 1) % len;

        let current = self.samples[self.cursor];
        self.samples[self.cursor] = DECAY * ((current + self.samples[next]) / 2.0);
        self.cursor = next;

        current
    }
}
