//! Tone playback: the ToneEngine boundary and its rodio implementation
//!
//! Playback is fire-and-forget on the device's own clock: once scheduled,
//! tones play to completion and scheduling failures are logged and
//! swallowed so they never reach session logic.

use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Source};
use thiserror::Error;

use crate::audio::synth::{ExpDecay, Tone, Waveform};

/// Gain for question tones.
const QUESTION_GAIN: f32 = 0.3;

// Outcome cues: a two-note chime on success, a low buzz on failure, both
// under a shared 0.2 -> 0.001 exponential decay over 500 ms.
const CHIME_HIGH_HZ: f32 = 880.0;
const CHIME_LOW_HZ: f32 = 660.0;
const CHIME_NOTE: Duration = Duration::from_millis(200);
const BUZZ_HZ: f32 = 150.0;
const BUZZ_DURATION: Duration = Duration::from_millis(500);
const DECAY_START: f32 = 0.2;
const DECAY_END: f32 = 0.001;
const DECAY_OVER: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available: {0}")]
    Stream(#[from] rodio::StreamError),
}

/// Boundary to the device audio output. All operations are non-blocking
/// and non-cancelable.
pub trait ToneEngine {
    /// Schedule each frequency to start at `now + i * stagger` and play
    /// for `duration`.
    fn play_tones(&self, freqs_hz: &[f64], stagger: Duration, duration: Duration);

    /// Play the success chime or the failure buzz.
    fn play_outcome(&self, correct: bool);
}

/// ToneEngine backed by the default rodio output device.
pub struct RodioEngine {
    // The stream must stay alive for the handle to keep playing.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioEngine {
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(RodioEngine {
            _stream: stream,
            handle,
        })
    }

    fn schedule(&self, tone: Tone, delay: Duration) {
        if let Err(err) = self.handle.play_raw(tone.delay(delay)) {
            log::warn!("tone playback failed: {err}");
        }
    }
}

impl ToneEngine for RodioEngine {
    fn play_tones(&self, freqs_hz: &[f64], stagger: Duration, duration: Duration) {
        for (i, &freq) in freqs_hz.iter().enumerate() {
            let tone = Tone::new(Waveform::Sine, freq as f32, QUESTION_GAIN, duration);
            self.schedule(tone, stagger * i as u32);
        }
    }

    fn play_outcome(&self, correct: bool) {
        let decay = ExpDecay {
            start_gain: DECAY_START,
            end_gain: DECAY_END,
            over: DECAY_OVER,
            offset: Duration::ZERO,
        };

        if correct {
            let high =
                Tone::new(Waveform::Sine, CHIME_HIGH_HZ, DECAY_START, CHIME_NOTE).with_decay(decay);
            self.schedule(high, Duration::ZERO);

            // The second note picks up the shared decay where the first
            // left off.
            let low = Tone::new(Waveform::Sine, CHIME_LOW_HZ, DECAY_START, CHIME_NOTE)
                .with_decay(ExpDecay {
                    offset: CHIME_NOTE,
                    ..decay
                });
            self.schedule(low, CHIME_NOTE);
        } else {
            let buzz =
                Tone::new(Waveform::Sawtooth, BUZZ_HZ, DECAY_START, BUZZ_DURATION).with_decay(decay);
            self.schedule(buzz, Duration::ZERO);
        }
    }
}

/// No-op engine for `--silent` runs and machines without an output device.
pub struct SilentEngine;

impl ToneEngine for SilentEngine {
    fn play_tones(&self, _freqs_hz: &[f64], _stagger: Duration, _duration: Duration) {}

    fn play_outcome(&self, _correct: bool) {}
}
