//! Session management: the quiz state machine and result summary
//!
//! # Components
//! - `state.rs`: QuizSession state machine for round flow and scoring
//! - `score.rs`: end-of-session summary text and share link

pub mod score;
pub mod state;

pub use score::{Summary, PRODUCT_URL};
pub use state::{
    Advance, Mode, Phase, QuizSession, TapOutcome, HIGHLIGHT_HOLD, ROUNDS_PER_SESSION,
    TONE_DURATION, TONE_STAGGER,
};
