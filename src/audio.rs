use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Error, Result};

/// Decoded recording. Samples are interleaved when `channels > 1`.
#[derive(Debug, Clone)]
pub(crate) struct Signal {
    pub(crate) samples: Vec<f32>,
    pub(crate) sample_rate: u32,
    pub(crate) channels: u16,
}

impl Signal {
    #[cfg(test)]
    pub(crate) fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    /// Number of sample frames (samples per channel)
    pub(crate) fn len(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Check the signal can be analyzed with frames of `frame_len` samples
    /// against a calibration taken at `sample_rate`.
    pub(crate) fn validate(&self, frame_len: usize, sample_rate: u32) -> Result<()> {
        if self.len() < frame_len {
            return Err(Error::InvalidAudioLength {
                required: frame_len,
                actual: self.len(),
            });
        }

        if self.sample_rate != sample_rate {
            return Err(Error::InvalidSampleRate {
                expected: sample_rate,
                actual: self.sample_rate,
            });
        }

        if self.channels != 1 {
            return Err(Error::InvalidChannelCount {
                channels: self.channels,
            });
        }

        Ok(())
    }
}

/// Decode an audio file. When `channel` is given only that channel is kept
/// and the result is mono; otherwise every channel is kept interleaved.
pub(crate) fn load_audio(path: &Path, channel: Option<usize>) -> Result<Signal> {
    let decode_err = |message: String| Error::Decode {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|e| decode_err(format!("error opening file: {}", e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_err(format!("unsupported format: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| decode_err("no audio track found".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| decode_err("unknown sample rate".to_string()))?;
    let channels = track
        .codec_params
        .channels
        .ok_or_else(|| decode_err("unknown channel count".to_string()))?
        .count() as u16;

    if let Some(ch) = channel
        && ch >= channels as usize
    {
        return Err(Error::ChannelOutOfRange {
            channel: ch,
            channels,
        });
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_err(format!("failed to create decoder: {}", e)))?;

    let track_id = track.id;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(decode_err(format!("error reading packet: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("{}: decode error: {}", path.display(), e);
                continue;
            }
        };

        let spec = *decoded.spec();
        let num_channels = spec.channels.count();

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        match channel {
            Some(ch) => samples.extend(
                sample_buf
                    .samples()
                    .chunks(num_channels)
                    .filter_map(|frame| frame.get(ch).copied()),
            ),
            None => samples.extend_from_slice(sample_buf.samples()),
        }
    }

    let signal = Signal {
        samples,
        sample_rate,
        channels: if channel.is_some() { 1 } else { channels },
    };

    log::debug!(
        "Loaded {} samples with fs = {} from {}",
        signal.len(),
        signal.sample_rate,
        path.display()
    );

    Ok(signal)
}
