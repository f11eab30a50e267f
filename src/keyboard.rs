//! Quarter-tone keyboard model
//!
//! 25 keys spanning one octave (C4..C5) on a 24-division-per-octave grid.
//! Even indices land on the 12-tone chromatic scale; odd indices are the
//! in-between quarter tones.

/// Number of equal divisions per octave.
pub const SCALES_PER_OCTAVE: usize = 24;

/// Number of keys on the keyboard (one octave, both endpoints included).
pub const NUM_KEYS: usize = 25;

/// Note names for the 13 chromatic positions C4..C5.
const NOTE_NAMES: [&str; 13] = [
    "ド(C4)",
    "ド♯",
    "レ",
    "レ♯",
    "ミ",
    "ファ",
    "ファ♯",
    "ソ",
    "ソ♯",
    "ラ",
    "ラ♯",
    "シ",
    "ド(C5)",
];

/// Frequency of a key in Hz.
///
/// Equal temperament generalized to 24 steps per octave, referenced so that
/// index 18 is A4 = 440 Hz.
pub fn key_frequency(index: usize) -> f64 {
    debug_assert!(index < NUM_KEYS);
    let reference = (9 * SCALES_PER_OCTAVE / 12) as f64;
    440.0 * 2f64.powf((index as f64 - reference) / SCALES_PER_OCTAVE as f64)
}

/// True if the key sits on the 12-tone chromatic grid.
pub fn is_chromatic(index: usize) -> bool {
    index % 2 == 0
}

/// Display label for a key: chromatic keys carry their note name, quarter
/// tones their numeric index.
pub fn key_label(index: usize) -> String {
    debug_assert!(index < NUM_KEYS);
    if is_chromatic(index) {
        NOTE_NAMES[index / 2].to_string()
    } else {
        index.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_reference() {
        assert_eq!(key_frequency(18), 440.0);
    }

    #[test]
    fn test_octave_endpoints_differ_by_factor_two() {
        let ratio = key_frequency(24) / key_frequency(0);
        assert!((ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_even_keys_align_with_chromatic_scale() {
        for semitone in 0..=12 {
            let ratio = key_frequency(2 * semitone) / key_frequency(0);
            let expected = 2f64.powf(semitone as f64 / 12.0);
            assert!(
                (ratio - expected).abs() < 1e-9,
                "semitone {} misaligned: {} vs {}",
                semitone,
                ratio,
                expected
            );
        }
    }

    #[test]
    fn test_adjacent_keys_differ_by_a_quarter_step() {
        let ratio = key_frequency(1) / key_frequency(0);
        assert!((ratio - 2f64.powf(1.0 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_labels() {
        assert_eq!(key_label(0), "ド(C4)");
        assert_eq!(key_label(18), "ラ");
        assert_eq!(key_label(24), "ド(C5)");
        assert_eq!(key_label(1), "1");
        assert_eq!(key_label(23), "23");
    }

    #[test]
    fn test_chromatic_keys_are_even() {
        assert!(is_chromatic(0));
        assert!(is_chromatic(24));
        assert!(!is_chromatic(9));
    }
}
