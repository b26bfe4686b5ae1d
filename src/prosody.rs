//! Coarse prosody and voice-quality heuristics over magnitude samples (0..=255 range,
//! as produced by a browser analyser node).
//!
//! Every function is pure and total. Inputs without enough samples to measure
//! anything score 0.0 instead of propagating NaN.

use serde::Serialize;

use crate::util::{clamp_pct, mean};

/// Full-scale magnitude of one sample.
const SAMPLE_FULL_SCALE: f64 = 255.0;
/// Half-scale, the reference level for loudness and frame-to-frame movement.
const SAMPLE_HALF_SCALE: f64 = 128.0;
const RHYTHM_CHUNK: usize = 10;
const RHYTHM_VARIANCE_CEILING: f64 = 1000.0;

/// Comfortable conversational pace, words per minute.
pub const OPTIMAL_RATE_WPM: f64 = 135.0;
pub const RATE_TOLERANCE_WPM: f64 = 30.0;

pub fn pitch_score(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    clamp_pct(mean(samples) / SAMPLE_FULL_SCALE * 100.0)
}

/// Consistency of the signal inside 10-sample chunks: low average variance scores high.
pub fn rhythm_score(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let variances: Vec<f64> = samples.chunks(RHYTHM_CHUNK).map(variance).collect();
    let avg = mean(&variances);
    100.0 - clamp_pct(avg / RHYTHM_VARIANCE_CEILING * 100.0)
}

pub fn intensity_score(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let rms = (samples.iter().map(|v| v * v).sum::<f64>() / samples.len() as f64).sqrt();
    clamp_pct(rms / SAMPLE_HALF_SCALE * 100.0)
}

/// Penalizes large jumps between consecutive samples. Needs at least two samples.
pub fn stability_score(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let deltas: Vec<f64> = samples.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    clamp_pct(100.0 - mean(&deltas) / SAMPLE_HALF_SCALE * 100.0)
}

/// Dynamic range of the signal relative to full scale.
pub fn clarity_score(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    clamp_pct((max - min) / SAMPLE_FULL_SCALE * 100.0)
}

/// Words per minute. Non-positive durations yield 0.
pub fn speech_rate(word_count: usize, duration_ms: f64) -> f64 {
    if duration_ms.is_nan() || duration_ms <= 0.0 {
        return 0.0;
    }
    word_count as f64 * 60_000.0 / duration_ms
}

/// 100 at the optimal pace, falling linearly to 0 one tolerance away.
pub fn normalized_rate(wpm: f64) -> f64 {
    if !wpm.is_finite() {
        return 0.0;
    }
    clamp_pct(100.0 - (wpm - OPTIMAL_RATE_WPM).abs() / RATE_TOLERANCE_WPM * 100.0)
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct VoiceQuality {
    pub intensity: f64,
    pub stability: f64,
    pub clarity: f64,
    pub overall: f64,
}

pub fn voice_quality(samples: &[f64]) -> VoiceQuality {
    let intensity = intensity_score(samples);
    let stability = stability_score(samples);
    let clarity = clarity_score(samples);
    VoiceQuality {
        intensity,
        stability,
        clarity,
        overall: (intensity + stability + clarity) / 3.0,
    }
}

fn variance(chunk: &[f64]) -> f64 {
    let m = mean(chunk);
    mean(&chunk.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>())
}
