/// Audio output using cpal
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{info, warn};

use crate::error::{Error, Result};

/// Pull-style sample source. The audio thread asks for `samples.len()` mono
/// samples at a time and expects every slot to be written, in order.
/// Implementations must not block for long or allocate.
pub trait AudioSource {
    fn fill_buffer(&mut self, samples: &mut [f32]);
}

impl<F> AudioSource for F
where
    F: FnMut(&mut [f32]),
{
    fn fill_buffer(&mut self, samples: &mut [f32]) {
        self(samples)
    }
}

/// Fills an interleaved device buffer from a mono source, copying each
/// sample to every channel. Works in place, so the callback never allocates.
pub fn fill_interleaved<S: AudioSource + ?Sized>(source: &mut S, data: &mut [f32], channels: usize) {
    let channels = channels.max(1);
    let frames = data.len() / channels;

    source.fill_buffer(&mut data[..frames]);

    if channels > 1 {
        // back to front, so no mono sample is overwritten before it is read
        for frame in (0..frames).rev() {
            let sample = data[frame];
            data[frame * channels..(frame + 1) * channels].fill(sample);
        }
    }
    data[frames * channels..].fill(0.0);
}

/// Default output device, plus the stream currently pulling from a source.
pub struct AudioOutput {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
    stream: Option<cpal::Stream>,
}

impl AudioOutput {
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
        let config = device.default_output_config()?;

        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(Error::UnsupportedSampleFormat(config.sample_format()));
        }

        info!(
            "audio output: {} ({} Hz, {} channels)",
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            config.sample_rate().0,
            config.channels()
        );

        Ok(Self {
            device,
            config,
            stream: None,
        })
    }

    /// Rate the device will pull at. Strings must be tuned against this value.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    pub fn channels(&self) -> usize {
        usize::from(self.config.channels())
    }

    /// Starts pulling from `source`, replacing any stream already running.
    pub fn play<S>(&mut self, mut source: S) -> Result<()>
    where
        S: AudioSource + Send + 'static,
    {
        self.stop();

        let channels = self.channels();
        let stream = self.device.build_output_stream(
            &self.config.config(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                fill_interleaved(&mut source, data, channels);
            },
            |err| warn!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        info!("audio stream started");
        self.stream = Some(stream);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            info!("audio stream stopped");
        }
    }

    pub fn is_playing(&self) -> bool {
        self.stream.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_source() {
        let mut next = 0.0f32;
        let mut source = |samples: &mut [f32]| {
            for s in samples {
                next += 1.0;
                *s = next;
            }
        };
        let mut buffer = [0.0; 4];
        source.fill_buffer(&mut buffer);
        assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_interleaved_mono() {
        let mut count = 0.0f32;
        let mut source = |samples: &mut [f32]| {
            for s in samples {
                count += 1.0;
                *s = count;
            }
        };
        let mut data = [9.0; 3];
        fill_interleaved(&mut source, &mut data, 1);
        assert_eq!(data, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_interleaved_fans_out_channels() {
        let mut count = 0.0f32;
        let mut source = |samples: &mut [f32]| {
            for s in samples {
                count += 1.0;
                *s = count;
            }
        };
        let mut data = [9.0; 7];
        fill_interleaved(&mut source, &mut data, 2);
        assert_eq!(data, [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 0.0]);

        let mut data = [9.0; 9];
        fill_interleaved(&mut source, &mut data, 3);
        assert_eq!(data, [4.0, 4.0, 4.0, 5.0, 5.0, 5.0, 6.0, 6.0, 6.0]);
    }
}
