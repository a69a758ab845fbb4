//! Common test utilities

#![allow(dead_code)]

use std::f32::consts::PI;
use std::io::Write;
use std::path::Path;

/// Generate a mono sine wave at the given frequency and amplitude
pub fn generate_sine(freq: f32, amplitude: f32, sample_rate: u32, duration_secs: f32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin() * amplitude)
        .collect()
}

/// Generate white noise scaled to `amplitude`
pub fn generate_noise(amplitude: f32, sample_rate: u32, duration_secs: f32, seed: u64) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    let mut rng = SimpleRng::new(seed);
    (0..num_samples)
        .map(|_| (rng.next_f32() * 2.0 - 1.0) * amplitude)
        .collect()
}

/// Simple pseudo-random number generator (xorshift)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() as f64 / u64::MAX as f64) as f32
    }
}

/// Write mono samples as a 16-bit WAV file
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> std::io::Result<()> {
    write_wav_channels(path, &[samples], sample_rate)
}

/// Write one sample slice per channel as an interleaved 16-bit WAV file
pub fn write_wav_channels(
    path: &Path,
    channels: &[&[f32]],
    sample_rate: u32,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_wav_to(&mut file, channels, sample_rate)
}

fn write_wav_to<W: Write>(
    writer: &mut W,
    channels: &[&[f32]],
    sample_rate: u32,
) -> std::io::Result<()> {
    let num_channels = channels.len() as u16;
    let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * num_channels as u32 * bits_per_sample as u32 / 8;
    let block_align = num_channels * bits_per_sample / 8;
    let data_size = (frames * num_channels as usize * 2) as u32;
    let file_size = 36 + data_size;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // chunk size
    writer.write_all(&1u16.to_le_bytes())?; // PCM format
    writer.write_all(&num_channels.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;

    for i in 0..frames {
        for channel in channels {
            let clamped = channel[i].clamp(-1.0, 1.0);
            let i16_sample = (clamped * 32767.0) as i16;
            writer.write_all(&i16_sample.to_le_bytes())?;
        }
    }

    Ok(())
}
