//! End-of-session summary: result text and share link
//!
//! Carries the mode label, the tiered encouragement message, and the
//! pre-formatted post text plus composer URL for the share action.

use crate::keyboard::SCALES_PER_OCTAVE;
use crate::session::state::Mode;

/// Landing page of the published quiz; appended to the share text.
pub const PRODUCT_URL: &str = "https://startcpp.github.io/microtonal-quiz/";

const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet?text=";

/// Final result of a completed session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub mode: Mode,
    pub correct: u32,
    pub total: u32,
}

impl Summary {
    /// Tiered encouragement message for the summary screen.
    pub fn encouragement(&self) -> &'static str {
        match self.mode {
            Mode::Single => match self.correct {
                10 => "あなたは完璧な単音識別マスターです！",
                7..=9 => "単音の聞き分けがとても上手ですね！",
                4..=6 => "単音識別、頑張りましたね！",
                _ => "単音識別は難しいですが、練習で上達します！",
            },
            Mode::Double => match self.correct {
                10 => "2音識別のプロフェッショナルですね！",
                7..=9 => "2音の聞き分けがかなり得意です！",
                4..=6 => "2音クイズ、よく頑張りました！",
                _ => "2音識別は難しいので、挑戦し続けてください！",
            },
            Mode::Triple => match self.correct {
                10 => "3音識別の天才です！称賛に値します！",
                7..=9 => "3音の聞き分けがかなり優秀です！",
                4..=6 => "3音識別に挑戦してすごいです！",
                _ => "3音は難関ですが、諦めずに挑戦しましょう！",
            },
        }
    }

    /// Pre-formatted post body for the share action.
    pub fn share_text(&self) -> String {
        format!(
            "{}で{}問中{}問正解！ #{}音階当てクイズ\n{}",
            self.mode.label(),
            self.total,
            self.correct,
            SCALES_PER_OCTAVE,
            PRODUCT_URL
        )
    }

    /// Composer link opening a pre-filled post.
    pub fn share_url(&self) -> String {
        format!("{}{}", TWEET_INTENT_URL, encode_uri_component(&self.share_text()))
    }
}

/// Percent-encode with the encodeURIComponent unreserved set.
fn encode_uri_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(mode: Mode, correct: u32) -> Summary {
        Summary {
            mode,
            correct,
            total: 10,
        }
    }

    #[test]
    fn test_encouragement_tiers() {
        assert_eq!(
            summary(Mode::Single, 10).encouragement(),
            "あなたは完璧な単音識別マスターです！"
        );
        assert_eq!(
            summary(Mode::Single, 7).encouragement(),
            "単音の聞き分けがとても上手ですね！"
        );
        assert_eq!(
            summary(Mode::Single, 4).encouragement(),
            "単音識別、頑張りましたね！"
        );
        assert_eq!(
            summary(Mode::Single, 3).encouragement(),
            "単音識別は難しいですが、練習で上達します！"
        );
        assert_eq!(
            summary(Mode::Double, 9).encouragement(),
            "2音の聞き分けがかなり得意です！"
        );
        assert_eq!(
            summary(Mode::Triple, 0).encouragement(),
            "3音は難関ですが、諦めずに挑戦しましょう！"
        );
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Single.label(), "単音モード");
        assert_eq!(Mode::Double.label(), "2音モード");
        assert_eq!(Mode::Triple.label(), "3音モード");
    }

    #[test]
    fn test_share_text_format() {
        let text = summary(Mode::Triple, 8).share_text();
        assert_eq!(
            text,
            "3音モードで10問中8問正解！ #24音階当てクイズ\nhttps://startcpp.github.io/microtonal-quiz/"
        );
    }

    #[test]
    fn test_share_url_is_percent_encoded() {
        let url = summary(Mode::Single, 5).share_url();
        assert!(url.starts_with(TWEET_INTENT_URL));
        let encoded = &url[TWEET_INTENT_URL.len()..];
        assert!(!encoded.contains('#'));
        assert!(!encoded.contains('\n'));
        assert!(encoded.contains("%23")); // the hashtag marker
        assert!(encoded.contains("%0A")); // the newline before the URL
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(
            encode_uri_component("AZaz09-_.!~*'()"),
            "AZaz09-_.!~*'()"
        );
        assert_eq!(encode_uri_component(" "), "%20");
        assert_eq!(encode_uri_component("\n"), "%0A");
        assert_eq!(encode_uri_component("で"), "%E3%81%A7");
        assert_eq!(encode_uri_component("a/b"), "a%2Fb");
    }
}
