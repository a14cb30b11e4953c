//! Transition chime.
//!
//! The notification sound is a transient generated tone, not an asset: a
//! half-second 800 Hz sine with an exponential fade-out, built as a
//! finite rodio `Source`. Playback failure (no audio device, headless CI)
//! is logged and swallowed; it never affects the timers.

use std::time::Duration;

use rodio::{OutputStream, Sink, Source};
use timedeck_core::Notifier;

const SAMPLE_RATE: u32 = 44100;
const TONE_HZ: f32 = 800.0;
const TONE_SECS: f32 = 0.5;
const START_GAIN: f32 = 0.3;
const END_GAIN: f32 = 0.01;

/// Finite sine chime with exponential decay.
pub struct ChimeTone {
    num_sample: usize,
    total_samples: usize,
}

impl ChimeTone {
    pub fn new() -> Self {
        Self {
            num_sample: 0,
            total_samples: (SAMPLE_RATE as f32 * TONE_SECS) as usize,
        }
    }
}

impl Iterator for ChimeTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        self.num_sample += 1;
        let gain = START_GAIN * (END_GAIN / START_GAIN).powf(t / TONE_SECS);
        Some((2.0 * std::f32::consts::PI * TONE_HZ * t).sin() * gain)
    }
}

impl Source for ChimeTone {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.num_sample)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(TONE_SECS))
    }
}

/// Notifier that plays the chime through the default output device.
pub struct ChimeNotifier {
    volume: f32,
}

impl ChimeNotifier {
    /// Volume is the config's 0-100 scale.
    pub fn new(volume: u32) -> Self {
        Self {
            volume: (volume.min(100) as f32) / 100.0,
        }
    }

    fn play(&self) -> Result<(), String> {
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| format!("no audio output: {e}"))?;
        let sink = Sink::try_new(&handle).map_err(|e| format!("cannot open sink: {e}"))?;
        sink.set_volume(self.volume);
        sink.append(ChimeTone::new());
        sink.sleep_until_end();
        Ok(())
    }
}

impl Notifier for ChimeNotifier {
    fn chime(&self) {
        if let Err(e) = self.play() {
            log::warn!("notification tone skipped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_is_finite_and_fades_out() {
        let samples: Vec<f32> = ChimeTone::new().collect();
        assert_eq!(samples.len(), (SAMPLE_RATE as f32 * TONE_SECS) as usize);
        let head_peak = samples[..1000].iter().fold(0f32, |m, s| m.max(s.abs()));
        let tail_peak = samples[samples.len() - 1000..]
            .iter()
            .fold(0f32, |m, s| m.max(s.abs()));
        assert!(head_peak > 0.2);
        assert!(tail_peak < 0.02);
    }

    #[test]
    fn tone_stays_within_gain_bounds() {
        assert!(ChimeTone::new().all(|s| s.abs() <= START_GAIN));
    }
}
