//! Full-session flow tests through a recording fake engine.

use std::cell::RefCell;
use std::time::Duration;

use microtonal_quiz::audio::ToneEngine;
use microtonal_quiz::keyboard::{key_frequency, NUM_KEYS};
use microtonal_quiz::session::{Advance, Mode, Phase, QuizSession, TapOutcome, ROUNDS_PER_SESSION};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq)]
enum EngineCall {
    Tones(Vec<f64>),
    Outcome(bool),
}

/// Captures every playback request in order.
#[derive(Default)]
struct RecordingEngine {
    calls: RefCell<Vec<EngineCall>>,
}

impl ToneEngine for RecordingEngine {
    fn play_tones(&self, freqs_hz: &[f64], _stagger: Duration, _duration: Duration) {
        self.calls
            .borrow_mut()
            .push(EngineCall::Tones(freqs_hz.to_vec()));
    }

    fn play_outcome(&self, correct: bool) {
        self.calls.borrow_mut().push(EngineCall::Outcome(correct));
    }
}

fn started(mode: Mode, seed: u64, engine: &RecordingEngine) -> QuizSession<'_, StdRng> {
    let mut session = QuizSession::new(mode, StdRng::seed_from_u64(seed), engine);
    session.start();
    session
}

#[test]
fn test_full_session_all_correct() {
    let engine = RecordingEngine::default();
    let mut session = started(Mode::Double, 4, &engine);

    let summary = loop {
        for key in session.answer().to_vec() {
            session.tap(key);
        }
        match session.advance() {
            Some(Advance::NextRound) => {}
            Some(Advance::Finished(summary)) => break summary,
            None => panic!("advance refused mid-session"),
        }
    };

    assert_eq!(summary.mode, Mode::Double);
    assert_eq!(summary.correct, ROUNDS_PER_SESSION);
    assert_eq!(session.history().len(), ROUNDS_PER_SESSION as usize);
    assert!(session.history().iter().all(|&c| c));

    // One tones request and one outcome cue per round, strictly alternating.
    let calls = engine.calls.borrow();
    assert_eq!(calls.len(), 2 * ROUNDS_PER_SESSION as usize);
    for pair in calls.chunks(2) {
        match pair {
            [EngineCall::Tones(freqs), EngineCall::Outcome(correct)] => {
                assert_eq!(freqs.len(), Mode::Double.notes_required());
                assert!(*correct);
            }
            other => panic!("unexpected call pair: {:?}", other),
        }
    }
}

#[test]
fn test_full_session_all_wrong() {
    let engine = RecordingEngine::default();
    let mut session = started(Mode::Single, 12, &engine);

    for _ in 0..ROUNDS_PER_SESSION {
        let wrong = (session.answer()[0] + 1) % NUM_KEYS;
        match session.tap(wrong) {
            TapOutcome::Resolved { correct, .. } => assert!(!correct),
            other => panic!("expected resolution, got {:?}", other),
        }
        session.advance();
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.correct_count(), 0);
    assert!(session.history().iter().all(|&c| !c));
    assert!(engine
        .calls
        .borrow()
        .iter()
        .all(|call| *call != EngineCall::Outcome(true)));
}

#[test]
fn test_overshoot_resolves_on_second_tap() {
    let engine = RecordingEngine::default();
    let mut session = started(Mode::Double, 30, &engine);

    // Two taps outside the answer resolve immediately at exact size; a
    // third tap lands in the Resolving phase and is dropped.
    let answer = session.answer().to_vec();
    let mut outside = (0..NUM_KEYS).filter(|i| !answer.contains(i));
    let first = outside.next().unwrap();
    let second = outside.next().unwrap();
    let third = outside.next().unwrap();

    assert_eq!(session.tap(first), TapOutcome::Selected(first));
    assert!(matches!(
        session.tap(second),
        TapOutcome::Resolved { correct: false, .. }
    ));
    assert_eq!(session.tap(third), TapOutcome::Ignored);
}

#[test]
fn test_tone_frequencies_follow_draw_order() {
    let engine = RecordingEngine::default();
    let session = started(Mode::Triple, 9, &engine);

    let expected: Vec<f64> = session.answer().iter().map(|&i| key_frequency(i)).collect();
    assert_eq!(engine.calls.borrow()[0], EngineCall::Tones(expected));
}

#[test]
fn test_mixed_session_scores_correctly() {
    let engine = RecordingEngine::default();
    let mut session = started(Mode::Single, 55, &engine);

    // Answer correctly on even rounds only.
    for round in 0..ROUNDS_PER_SESSION {
        let answer = session.answer()[0];
        let tap = if round % 2 == 0 {
            answer
        } else {
            (answer + 1) % NUM_KEYS
        };
        session.tap(tap);
        session.advance();
    }

    assert_eq!(session.correct_count(), 5);
    let expected: Vec<bool> = (0..ROUNDS_PER_SESSION).map(|r| r % 2 == 0).collect();
    assert_eq!(session.history(), expected.as_slice());
}

#[test]
fn test_finished_session_accepts_nothing_until_restart() {
    let engine = RecordingEngine::default();
    let mut session = started(Mode::Single, 77, &engine);

    for _ in 0..ROUNDS_PER_SESSION {
        let key = session.answer()[0];
        session.tap(key);
        session.advance();
    }
    assert_eq!(session.phase(), Phase::Finished);

    let calls_before = engine.calls.borrow().len();
    assert_eq!(session.tap(3), TapOutcome::Ignored);
    assert_eq!(session.advance(), None);
    assert_eq!(engine.calls.borrow().len(), calls_before);

    // Restarting plays again.
    session.start();
    assert_eq!(session.phase(), Phase::Awaiting);
    assert_eq!(engine.calls.borrow().len(), calls_before + 1);
    assert!(session.history().is_empty());
}
