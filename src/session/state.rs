//! Quiz session state machine
//!
//! Drives a fixed-length run of rounds:
//! - Draws each round's answer (distinct keys, uniform over the keyboard)
//! - Toggles the player's selection until it reaches the required size
//! - Resolves by unordered comparison and records the outcome
//! - Requests question tones and outcome cues from the ToneEngine

use std::time::Duration;

use rand::Rng;

use crate::audio::ToneEngine;
use crate::keyboard::{key_frequency, NUM_KEYS};
use crate::session::score::Summary;

/// Rounds per session, independent of mode.
pub const ROUNDS_PER_SESSION: u32 = 10;

/// Delay between successive question tones.
pub const TONE_STAGGER: Duration = Duration::from_millis(50);

/// Duration of each question tone.
pub const TONE_DURATION: Duration = Duration::from_secs(1);

/// How long the correct answer stays highlighted after a round resolves.
pub const HIGHLIGHT_HOLD: Duration = Duration::from_millis(500);

/// Difficulty tier: how many simultaneous notes must be identified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Single,
    Double,
    Triple,
}

impl Mode {
    /// Number of notes sounded (and required in the selection) per round.
    pub fn notes_required(self) -> usize {
        match self {
            Mode::Single => 1,
            Mode::Double => 2,
            Mode::Triple => 3,
        }
    }

    /// Display name of the mode.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Single => "単音モード",
            Mode::Double => "2音モード",
            Mode::Triple => "3音モード",
        }
    }

    pub fn from_name(name: &str) -> Option<Mode> {
        match name {
            "single" => Some(Mode::Single),
            "double" => Some(Mode::Double),
            "triple" => Some(Mode::Triple),
            _ => None,
        }
    }
}

/// Where the session currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not started.
    Idle,
    /// A round is live and taking taps.
    Awaiting,
    /// A round just resolved; the answer highlight is being held.
    Resolving,
    /// All rounds played.
    Finished,
}

/// What a single tap did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Key added to the selection.
    Selected(usize),
    /// Key removed from the selection.
    Deselected(usize),
    /// The selection reached the required size and the round resolved.
    /// `answer` carries the drawn keys for the highlight.
    Resolved { correct: bool, answer: Vec<usize> },
    /// Tap arrived outside the Awaiting phase (or out of range) and was
    /// dropped.
    Ignored,
}

/// What happened when the driver stepped past the highlight hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// A new round began; its tones have been requested.
    NextRound,
    /// Round 10 resolved; the session is done.
    Finished(Summary),
}

/// A complete quiz session: mode, round counter, score, outcome history,
/// and the live answer/selection sets for the current round.
pub struct QuizSession<'a, R: Rng> {
    mode: Mode,
    phase: Phase,
    round_number: u32,
    correct_count: u32,
    history: Vec<bool>,
    /// Current answer in draw order; distinct by construction.
    answer: Vec<usize>,
    /// Player's in-progress selection in tap order.
    selection: Vec<usize>,
    rng: R,
    engine: &'a dyn ToneEngine,
}

impl<'a, R: Rng> QuizSession<'a, R> {
    pub fn new(mode: Mode, rng: R, engine: &'a dyn ToneEngine) -> Self {
        QuizSession {
            mode,
            phase: Phase::Idle,
            round_number: 0,
            correct_count: 0,
            history: Vec::with_capacity(ROUNDS_PER_SESSION as usize),
            answer: Vec::new(),
            selection: Vec::new(),
            rng,
            engine,
        }
    }

    /// Reset counters and history, then enter round 1.
    pub fn start(&mut self) {
        self.round_number = 0;
        self.correct_count = 0;
        self.history.clear();
        self.begin_round();
    }

    /// Draw a fresh answer and request its tones.
    fn begin_round(&mut self) {
        self.round_number += 1;
        self.selection.clear();
        self.answer.clear();

        // Rejection sampling; terminates because the mode needs at most 3 of
        // 25 keys.
        while self.answer.len() < self.mode.notes_required() {
            let candidate = self.rng.gen_range(0..NUM_KEYS);
            if !self.answer.contains(&candidate) {
                self.answer.push(candidate);
            }
        }

        let freqs: Vec<f64> = self.answer.iter().map(|&i| key_frequency(i)).collect();
        self.engine.play_tones(&freqs, TONE_STAGGER, TONE_DURATION);
        self.phase = Phase::Awaiting;
    }

    /// Toggle a key in the selection. The round resolves the moment the
    /// selection size equals the mode's required count, never on overshoot.
    pub fn tap(&mut self, index: usize) -> TapOutcome {
        if self.phase != Phase::Awaiting || index >= NUM_KEYS {
            return TapOutcome::Ignored;
        }

        if let Some(position) = self.selection.iter().position(|&i| i == index) {
            self.selection.remove(position);
            return TapOutcome::Deselected(index);
        }

        self.selection.push(index);
        if self.selection.len() == self.mode.notes_required() {
            return self.resolve_round();
        }
        TapOutcome::Selected(index)
    }

    /// Compare selection and answer as unordered sets of equal size.
    fn resolve_round(&mut self) -> TapOutcome {
        let mut chosen = self.selection.clone();
        let mut expected = self.answer.clone();
        chosen.sort_unstable();
        expected.sort_unstable();

        let correct = chosen == expected;
        if correct {
            self.correct_count += 1;
        }
        self.history.push(correct);
        self.selection.clear();
        self.phase = Phase::Resolving;
        self.engine.play_outcome(correct);

        TapOutcome::Resolved {
            correct,
            answer: self.answer.clone(),
        }
    }

    /// Step past the answer highlight: begin the next round, or finish after
    /// the last one. Returns None outside the Resolving phase.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase != Phase::Resolving {
            return None;
        }
        if self.round_number >= ROUNDS_PER_SESSION {
            self.phase = Phase::Finished;
            Some(Advance::Finished(self.summary()))
        } else {
            self.begin_round();
            Some(Advance::NextRound)
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            mode: self.mode,
            correct: self.correct_count,
            total: ROUNDS_PER_SESSION,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Per-round outcomes so far, in play order.
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    /// The player's in-progress selection, in tap order.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// The current round's answer, in draw order.
    pub fn answer(&self) -> &[usize] {
        &self.answer
    }
}
