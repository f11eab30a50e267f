//! Terminal display and UI rendering
//!
//! Features:
//! - 25-key keyboard strip with selection and answer highlighting
//! - Round header and 〇/✖ history strip
//! - Mode selection menu, summary and share screens

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::error::Error;
use std::io::{stdout, Write};

use crate::cli::input::KEY_CHARS;
use crate::keyboard;
use crate::session::{Summary, ROUNDS_PER_SESSION};

// Screen rows for the quiz layout.
const ROW_HEADER: u16 = 1;
const ROW_KEYBOARD: u16 = 3;
const ROW_HISTORY: u16 = 9;
const ROW_HELP: u16 = 11;

const KEYS_PER_ROW: usize = 5;

/// Terminal display manager
pub struct Display;

impl Display {
    /// Create a plain display on the main screen.
    pub fn simple() -> Result<Self, Box<dyn Error>> {
        Ok(Display)
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Mode selection menu.
    pub fn show_mode_select(&self) -> Result<(), Box<dyn Error>> {
        self.clear()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, ROW_HEADER),
            SetForegroundColor(Color::Cyan),
            Print("24音階 音当てクイズ"),
            ResetColor,
            cursor::MoveTo(0, ROW_HEADER + 2),
            Print("モードを選んでください:"),
            cursor::MoveTo(2, ROW_HEADER + 3),
            Print("1: 単音モード"),
            cursor::MoveTo(2, ROW_HEADER + 4),
            Print("2: 2音モード"),
            cursor::MoveTo(2, ROW_HEADER + 5),
            Print("3: 3音モード"),
            cursor::MoveTo(0, ROW_HEADER + 7),
            SetForegroundColor(Color::DarkGrey),
            Print("Esc または Ctrl+C で終了"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Round header.
    pub fn show_round(&self, round_number: u32) -> Result<(), Box<dyn Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, ROW_HEADER),
            SetForegroundColor(Color::Cyan),
            Print(format!("第{}問 / {}", round_number, ROUNDS_PER_SESSION)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the 25-key strip as a grid. Selected keys show in cyan,
    /// answer highlights in green, quarter tones dimmed.
    pub fn show_keyboard(
        &self,
        selected: &[usize],
        highlight: &[usize],
    ) -> Result<(), Box<dyn Error>> {
        let mut stdout = stdout();
        for row in 0..(keyboard::NUM_KEYS / KEYS_PER_ROW) {
            execute!(
                stdout,
                cursor::MoveTo(0, ROW_KEYBOARD + row as u16),
                terminal::Clear(ClearType::CurrentLine)
            )?;
            for col in 0..KEYS_PER_ROW {
                let index = row * KEYS_PER_ROW + col;
                let trigger = KEY_CHARS.as_bytes()[index] as char;
                let color = if highlight.contains(&index) {
                    Color::Green
                } else if selected.contains(&index) {
                    Color::Cyan
                } else if keyboard::is_chromatic(index) {
                    Color::White
                } else {
                    Color::DarkGrey
                };
                let marker = if highlight.contains(&index) {
                    '*'
                } else if selected.contains(&index) {
                    '>'
                } else {
                    ' '
                };
                let cell = format!("{}{}:{}", marker, trigger, keyboard::key_label(index));
                execute!(
                    stdout,
                    SetForegroundColor(color),
                    Print(format!("{:<12}", cell)),
                    ResetColor,
                )?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    /// Append-only pass/fail strip, one glyph per resolved round.
    pub fn show_history(&self, history: &[bool]) -> Result<(), Box<dyn Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, ROW_HISTORY),
            terminal::Clear(ClearType::CurrentLine)
        )?;
        for &correct in history {
            let (glyph, color) = if correct {
                ("〇 ", Color::Green)
            } else {
                ("✖ ", Color::Red)
            };
            execute!(stdout, SetForegroundColor(color), Print(glyph), ResetColor)?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Help line for the quiz screen.
    pub fn show_quiz_help(&self) -> Result<(), Box<dyn Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, ROW_HELP),
            SetForegroundColor(Color::DarkGrey),
            Print("鳴った音のキーを押してください（もう一度押すと取り消し）  |  Esc で終了"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Final summary screen.
    pub fn show_summary(&self, summary: &Summary) -> Result<(), Box<dyn Error>> {
        self.clear()?;
        let mut stdout = stdout();
        let score_color = if summary.correct >= 7 {
            Color::Green
        } else if summary.correct >= 4 {
            Color::Yellow
        } else {
            Color::Red
        };
        execute!(
            stdout,
            cursor::MoveTo(0, ROW_HEADER),
            SetForegroundColor(Color::Cyan),
            Print(format!("{} の結果", summary.mode.label())),
            ResetColor,
            cursor::MoveTo(0, ROW_HEADER + 2),
            Print("✅ 正解数："),
            SetForegroundColor(score_color),
            Print(format!("{} / {}", summary.correct, summary.total)),
            ResetColor,
            cursor::MoveTo(0, ROW_HEADER + 4),
            Print(summary.encouragement()),
            cursor::MoveTo(0, ROW_HEADER + 6),
            SetForegroundColor(Color::DarkGrey),
            Print("r: モード選択に戻る  |  s: 共有リンクを表示  |  Esc: 終了"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Pre-formatted share post and composer link.
    pub fn show_share(&self, summary: &Summary) -> Result<(), Box<dyn Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, ROW_HEADER + 8),
            Print("投稿文:")
        )?;
        // Raw mode: anchor every line explicitly.
        let text = summary.share_text();
        for (i, line) in text.lines().enumerate() {
            execute!(
                stdout,
                cursor::MoveTo(2, ROW_HEADER + 9 + i as u16),
                Print(line)
            )?;
        }
        execute!(
            stdout,
            cursor::MoveTo(0, ROW_HEADER + 12),
            Print("共有リンク:"),
            cursor::MoveTo(2, ROW_HEADER + 13),
            SetForegroundColor(Color::Blue),
            Print(summary.share_url()),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn Error>> {
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
