use std::f32::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const SAMPLE_RATE: u32 = 48000;

fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * bits_per_sample as u32 / 8;
    let block_align = channels * bits_per_sample / 8;
    let data_size = samples.len() as u32 * 2;
    let file_size = 36 + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?;
    writer.write_all(&channels.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&bits_per_sample.to_le_bytes())?;
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;

    for &sample in samples {
        let value = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_all(&value.to_le_bytes())?;
    }

    Ok(())
}

fn sine(freq: f32, amplitude: f32, duration: f32) -> Vec<f32> {
    let n = (duration * SAMPLE_RATE as f32) as usize;
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / SAMPLE_RATE as f32).sin())
        .collect()
}

/// Xorshift white noise
fn noise(amplitude: f32, duration: f32, seed: u64) -> Vec<f32> {
    let n = (duration * SAMPLE_RATE as f32) as usize;
    let mut state = seed.max(1);
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state as f64 / u64::MAX as f64) as f32;
            (unit * 2.0 - 1.0) * amplitude
        })
        .collect()
}

/// Quiet background with a louder burst of `freq` starting at `burst_at` seconds
fn pass_by(freq: f32, duration: f32, burst_at: f32, seed: u64) -> Vec<f32> {
    let mut samples = noise(0.005, duration, seed);
    let start = (burst_at * SAMPLE_RATE as f32) as usize;
    let tone = sine(freq, 0.2, 1.5);
    let len = samples.len();
    for (s, t) in samples[start.min(len)..].iter_mut().zip(tone) {
        *s += t;
    }
    samples
}

const LIMITS: &str = r#"{
  "stat": {
    "1/3 octave bands": {
      "315": 60, "397": 60, "500": 60, "630": 60, "794": 62, "1000": 62, "1260": 62,
      "1587": 62, "2000": 60, "2520": 60, "3175": 58, "4000": 58, "5040": 58
    },
    "two band spec": 65
  },
  "30": {
    "1/3 octave bands": [70, 70, 70, 72, 72, 72, 72, 70, 70, 68, 68, 68, 68],
    "two band spec": 75
  }
}
"#;

fn main() -> std::io::Result<()> {
    let dir = Path::new("test_data");
    std::fs::create_dir_all(dir)?;

    // 94 dB SPL reference tone
    write_wav(&dir.join("cal_94_0412.wav"), &sine(1000.0, 0.5, 3.0), SAMPLE_RATE)?;

    // Background only
    write_wav(&dir.join("amb_0412_1.wav"), &noise(0.005, 3.0, 7), SAMPLE_RATE)?;

    // Stationary test with a steady 500 Hz tone
    let mut stat = noise(0.005, 3.0, 11);
    for (s, t) in stat.iter_mut().zip(sine(500.0, 0.05, 3.0)) {
        *s += t;
    }
    write_wav(&dir.join("stat_0412_1.wav"), &stat, SAMPLE_RATE)?;

    // 30 km/h pass-by: 2 kHz burst in the middle of the recording
    write_wav(&dir.join("30_0412_1.wav"), &pass_by(2000.0, 4.0, 1.5, 13), SAMPLE_RATE)?;

    std::fs::write(dir.join("sound_level_reqs.json"), LIMITS)?;

    println!(
        "Generated: cal_94_0412.wav, amb_0412_1.wav, stat_0412_1.wav, 30_0412_1.wav, sound_level_reqs.json"
    );
    Ok(())
}
