//! Loudest-frame selection

/// Offset of the `frame_len`-sample window with the greatest RMS energy.
///
/// Windows hop by a quarter frame; `floor(len / frame_len) * 4` windows are
/// scanned, so the final ones may run past the end of the signal and are
/// measured over the samples that exist. Ties keep the earliest window.
pub(crate) fn find_loudest_frame(samples: &[f32], frame_len: usize) -> usize {
    if frame_len == 0 {
        return 0;
    }

    let hop = frame_len / 4;
    let frames = (samples.len() / frame_len) * 4;

    let mut best_idx = 0;
    let mut best_rms = f64::NEG_INFINITY;

    for frame in 0..frames {
        let start = (hop * frame).min(samples.len());
        let end = (start + frame_len).min(samples.len());
        let energy: f64 = samples[start..end]
            .iter()
            .map(|&s| (s as f64) * (s as f64))
            .sum();
        let rms = (energy / frame_len as f64).sqrt();

        if rms > best_rms {
            best_rms = rms;
            best_idx = frame;
        }
    }

    hop * best_idx
}

/// The `frame_len` samples starting at `offset`
pub(crate) fn extract_frame(samples: &[f32], offset: usize, frame_len: usize) -> &[f32] {
    let end = (offset + frame_len).min(samples.len());
    &samples[offset.min(end)..end]
}
