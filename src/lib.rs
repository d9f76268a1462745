/// TONEMATRIX - a grid step sequencer that plucks simulated strings
///
/// This library provides the core components of the tone matrix:
/// - Plucked string model with a decaying averaging filter
/// - Square light grid swept column by column, one string per row
/// - Draw sink and audio source contracts for the surrounding front end
/// - Audio output through the default device

pub mod audio;
pub mod config;
pub mod error;
pub mod instrument;
pub mod render;
pub mod sequencer;

// Re-export commonly used types
pub use audio::{AudioOutput, AudioSource};
pub use config::Config;
pub use error::{Error, Result};
pub use instrument::ResonantString;
pub use render::{Color, DrawSink, Rect, RectangleCatcher};
pub use sequencer::playback::SharedToneMatrix;
pub use sequencer::tuning::frequency_for_row;
pub use sequencer::{Grid, ToneMatrix, STEP_PERIOD};
