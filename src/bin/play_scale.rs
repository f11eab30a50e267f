//! Sound the whole 25-key quarter-tone strip in ascending order
//!
//! Prints the key/label/frequency table while the scale plays. Handy for
//! checking the tuning by ear before a quiz session.

use clap::Parser;
use microtonal_quiz::audio::{RodioEngine, ToneEngine};
use microtonal_quiz::keyboard::{key_frequency, key_label, NUM_KEYS};
use std::error::Error;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "play-scale")]
#[command(about = "Play all 25 quarter-tone keys in ascending order")]
struct Args {
    /// Delay between successive keys in milliseconds
    #[arg(long, default_value = "300")]
    stagger_ms: u64,

    /// Duration of each tone in milliseconds
    #[arg(long, default_value = "600")]
    duration_ms: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let engine = RodioEngine::new()?;
    let freqs: Vec<f64> = (0..NUM_KEYS).map(key_frequency).collect();

    println!("{:<5} {:<10} {:>10}", "Key", "Label", "Hz");
    for (index, freq) in freqs.iter().enumerate() {
        println!("{:<5} {:<10} {:>10.2}", index, key_label(index), freq);
    }
    println!();

    let stagger = Duration::from_millis(args.stagger_ms);
    let duration = Duration::from_millis(args.duration_ms);
    engine.play_tones(&freqs, stagger, duration);

    // Playback is fire-and-forget; hold the process open until the last
    // tone has finished.
    thread::sleep(stagger * (NUM_KEYS as u32 - 1) + duration);
    println!("✓ Played {} keys", NUM_KEYS);

    Ok(())
}
