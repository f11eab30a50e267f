//! Microtonal Quiz - quarter-tone ear training in the terminal
//!
//! Plays synthesized notes on a 24-division-per-octave keyboard and asks
//! the player to identify which of the 25 keys were sounded. Ten rounds
//! per session across three difficulty modes.

use clap::Parser;
use microtonal_quiz::audio::{RodioEngine, SilentEngine, ToneEngine};
use microtonal_quiz::cli::display::Display;
use microtonal_quiz::cli::input::InputHandler;
use microtonal_quiz::session::{Advance, Mode, QuizSession, TapOutcome, HIGHLIGHT_HOLD};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::thread;

#[derive(Parser, Debug)]
#[command(name = "Microtonal Quiz")]
#[command(about = "Quarter-tone ear training quiz in the terminal")]
struct Args {
    /// Start directly in a mode: single, double or triple
    #[arg(short, long)]
    mode: Option<String>,

    /// Seed for the round generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Run without audio output
    #[arg(long)]
    silent: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    debug: bool,
}

/// How a session loop ended.
enum Exit {
    /// Back to mode selection.
    Restart,
    /// Leave the program.
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let preset_mode = match args.mode.as_deref() {
        Some(name) => match Mode::from_name(name) {
            Some(mode) => Some(mode),
            None => {
                return Err(
                    format!("unknown mode: {} (expected single, double or triple)", name).into(),
                )
            }
        },
        None => None,
    };

    let engine: Box<dyn ToneEngine> = if args.silent {
        Box::new(SilentEngine)
    } else {
        Box::new(RodioEngine::new()?)
    };

    let display = Display::simple()?;
    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    let result = run(&args, preset_mode, engine.as_ref(), &display, &input);

    // Cleanup
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;

    result
}

/// Outer loop: mode selection, then one full session per pass.
fn run(
    args: &Args,
    preset_mode: Option<Mode>,
    engine: &dyn ToneEngine,
    display: &Display,
    input: &InputHandler,
) -> Result<(), Box<dyn Error>> {
    loop {
        let mode = match preset_mode {
            Some(mode) => mode,
            None => match select_mode(display, input)? {
                Some(mode) => mode,
                None => return Ok(()),
            },
        };

        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match run_session(mode, rng, engine, display, input)? {
            Exit::Restart => continue,
            Exit::Quit => return Ok(()),
        }
    }
}

/// Mode selection screen. None means the player quit.
fn select_mode(display: &Display, input: &InputHandler) -> Result<Option<Mode>, Box<dyn Error>> {
    display.show_mode_select()?;
    loop {
        let key = match input.read_key()? {
            Some(key) => key,
            None => continue,
        };
        if InputHandler::is_exit(&key) {
            return Ok(None);
        }
        let mode = match InputHandler::key_char(&key) {
            Some('1') => Mode::Single,
            Some('2') => Mode::Double,
            Some('3') => Mode::Triple,
            _ => continue,
        };
        return Ok(Some(mode));
    }
}

/// Play one full session: ten rounds, then the summary screen.
fn run_session(
    mode: Mode,
    rng: StdRng,
    engine: &dyn ToneEngine,
    display: &Display,
    input: &InputHandler,
) -> Result<Exit, Box<dyn Error>> {
    let mut session = QuizSession::new(mode, rng, engine);
    session.start();
    log::debug!("session started in {:?} mode", mode);
    draw_round(display, &session)?;

    let summary = loop {
        let key = match input.read_key()? {
            Some(key) => key,
            None => continue,
        };
        if InputHandler::is_exit(&key) {
            return Ok(Exit::Quit);
        }
        let index = match InputHandler::key_index(&key) {
            Some(index) => index,
            None => continue,
        };

        match session.tap(index) {
            TapOutcome::Selected(_) | TapOutcome::Deselected(_) => {
                draw_round(display, &session)?;
            }
            TapOutcome::Resolved { correct, answer } => {
                log::debug!(
                    "round {} resolved, correct={}",
                    session.round_number(),
                    correct
                );
                // Hold the answer highlight, then move on.
                display.show_keyboard(&[], &answer)?;
                display.show_history(session.history())?;
                thread::sleep(HIGHLIGHT_HOLD);
                input.drain()?;
                match session.advance() {
                    Some(Advance::NextRound) => draw_round(display, &session)?,
                    Some(Advance::Finished(summary)) => break summary,
                    None => {}
                }
            }
            TapOutcome::Ignored => {}
        }
    };

    log::debug!("session finished: {}/{}", summary.correct, summary.total);
    display.show_summary(&summary)?;
    loop {
        let key = match input.read_key()? {
            Some(key) => key,
            None => continue,
        };
        if InputHandler::is_exit(&key) {
            return Ok(Exit::Quit);
        }
        match InputHandler::key_char(&key) {
            Some('r') => return Ok(Exit::Restart),
            Some('s') => display.show_share(&summary)?,
            _ => {}
        }
    }
}

fn draw_round(display: &Display, session: &QuizSession<'_, StdRng>) -> Result<(), Box<dyn Error>> {
    display.clear()?;
    display.show_round(session.round_number())?;
    display.show_keyboard(session.selection(), &[])?;
    display.show_history(session.history())?;
    display.show_quiz_help()
}
