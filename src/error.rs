/// Error types shared by the string model, the sequencer and the audio output
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A constructor argument or pointer position failed its precondition.
    /// The object it was aimed at is left untouched.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("no default audio output device")]
    NoOutputDevice,

    #[error("failed to query output config: {0}")]
    OutputConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format {0:?} (only f32 is supported)")]
    UnsupportedSampleFormat(cpal::SampleFormat),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidParameter(message.into())
    }
}
