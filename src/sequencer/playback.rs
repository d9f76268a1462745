/// Playback handle - one tone matrix shared by the input thread, the renderer and the audio callback
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Grid, ToneMatrix};
use crate::audio::AudioSource;
use crate::error::Result;
use crate::render::DrawSink;

/// Cloneable handle serialising every access to a [`ToneMatrix`].
///
/// Each operation holds the lock for exactly one call. The audio callback
/// locks once per buffer, so edits only ever wait for the current buffer,
/// and a resize is seen by the drawer and the callback all at once.
#[derive(Clone)]
pub struct SharedToneMatrix {
    inner: Arc<Mutex<ToneMatrix>>,
}

impl SharedToneMatrix {
    pub fn new(matrix: ToneMatrix) -> Self {
        Self {
            inner: Arc::new(Mutex::new(matrix)),
        }
    }

    pub fn toggle_at(&self, x: i32, y: i32) -> Result<bool> {
        self.inner.lock().toggle_at(x, y)
    }

    pub fn paint_at(&self, x: i32, y: i32) -> Result<()> {
        self.inner.lock().paint_at(x, y)
    }

    pub fn resize(&self, new_size: usize) -> Result<()> {
        self.inner.lock().resize(new_size)
    }

    pub fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        self.inner.lock().draw(sink)
    }

    /// Copy of the lights, for rendering without holding the lock.
    pub fn grid_snapshot(&self) -> Grid {
        self.inner.lock().grid().clone()
    }

    pub fn grid_size(&self) -> usize {
        self.inner.lock().grid_size()
    }

    pub fn light_size(&self) -> i32 {
        self.inner.lock().light_size()
    }

    pub fn extent(&self) -> i32 {
        self.inner.lock().extent()
    }

    pub fn column(&self) -> usize {
        self.inner.lock().column()
    }

    /// Runs `f` against a consistent view of the matrix.
    pub fn with<R>(&self, f: impl FnOnce(&ToneMatrix) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl AudioSource for SharedToneMatrix {
    fn fill_buffer(&mut self, samples: &mut [f32]) {
        self.inner.lock().fill_buffer(samples);
    }
}
