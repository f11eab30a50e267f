//! Tone synthesis: oscillator sources for rodio
//!
//! Sample-wise sine/sawtooth generation with an optional exponential decay
//! envelope, monophonic at 44.1 kHz.

use std::time::Duration;

use rodio::Source;

/// Output sample rate for all generated tones.
pub const SAMPLE_RATE: u32 = 44_100;

/// Oscillator waveform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// Exponential gain decay evaluated on an effect's shared timeline.
///
/// `offset` shifts a tone's start into the curve, so tones scheduled later
/// in the same effect continue the decay instead of restarting it.
#[derive(Clone, Copy, Debug)]
pub struct ExpDecay {
    pub start_gain: f32,
    pub end_gain: f32,
    pub over: Duration,
    pub offset: Duration,
}

impl ExpDecay {
    /// Gain `seconds` into this tone, clamped to the end gain once the
    /// curve has run out.
    pub fn gain_at(&self, seconds: f32) -> f32 {
        let span = self.over.as_secs_f32();
        let progress = ((self.offset.as_secs_f32() + seconds) / span).clamp(0.0, 1.0);
        self.start_gain * (self.end_gain / self.start_gain).powf(progress)
    }
}

/// A single fixed-duration tone, playable as a rodio source.
pub struct Tone {
    waveform: Waveform,
    frequency: f32,
    gain: f32,
    envelope: Option<ExpDecay>,
    total_samples: usize,
    position: usize,
    /// Normalized phase in [0, 1).
    phase: f32,
}

impl Tone {
    pub fn new(waveform: Waveform, frequency: f32, gain: f32, duration: Duration) -> Self {
        let total_samples = (duration.as_secs_f32() * SAMPLE_RATE as f32) as usize;
        Tone {
            waveform,
            frequency,
            gain,
            envelope: None,
            total_samples,
            position: 0,
            phase: 0.0,
        }
    }

    /// Replace the flat gain with an exponential decay envelope.
    pub fn with_decay(mut self, envelope: ExpDecay) -> Self {
        self.envelope = Some(envelope);
        self
    }

    fn waveform_sample(&self) -> f32 {
        match self.waveform {
            Waveform::Sine => (self.phase * std::f32::consts::TAU).sin(),
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
        }
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total_samples {
            return None;
        }

        let seconds = self.position as f32 / SAMPLE_RATE as f32;
        let gain = match &self.envelope {
            Some(envelope) => envelope.gain_at(seconds),
            None => self.gain,
        };
        let sample = self.waveform_sample() * gain;

        self.position += 1;
        self.phase += self.frequency / SAMPLE_RATE as f32;
        self.phase -= self.phase.floor();

        Some(sample)
    }
}

impl Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples.saturating_sub(self.position))
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples as f32 / SAMPLE_RATE as f32,
        ))
    }
}
