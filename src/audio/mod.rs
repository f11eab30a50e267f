//! Audio output: tone synthesis and the playback boundary
//!
//! # Components
//! - `synth.rs`: oscillator sources with decay envelopes
//! - `engine.rs`: ToneEngine trait plus rodio and silent implementations

pub mod engine;
pub mod synth;

pub use engine::{AudioError, RodioEngine, SilentEngine, ToneEngine};
pub use synth::{ExpDecay, Tone, Waveform};
