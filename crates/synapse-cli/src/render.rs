//! Terminal rendering of quiz state.

use std::io::{self, Write};

use synapse_core::Session;
use synapse_prefs::theme::hex_to_rgb;
use synapse_prefs::Theme;

/// Colour roles used on the terminal.
#[derive(Debug, Clone, Copy)]
pub enum Role {
    Correct,
    Wrong,
    Neutral,
}

/// Theme colours as ANSI true-colour escapes, or nothing when not a terminal.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    correct: Option<(u8, u8, u8)>,
    wrong: Option<(u8, u8, u8)>,
    neutral: Option<(u8, u8, u8)>,
}

impl Palette {
    pub fn new(theme: &Theme, enabled: bool) -> Self {
        if !enabled {
            return Self::default();
        }
        Self {
            correct: hex_to_rgb(theme.correct),
            wrong: hex_to_rgb(theme.wrong),
            neutral: hex_to_rgb(theme.neutral),
        }
    }

    /// A palette that never emits escapes.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn paint(&self, text: &str, role: Role) -> String {
        let colour = match role {
            Role::Correct => self.correct,
            Role::Wrong => self.wrong,
            Role::Neutral => self.neutral,
        };
        match colour {
            Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
            None => text.to_string(),
        }
    }
}

/// Print the current question, its options and the progress line.
pub fn render_question(out: &mut impl Write, session: &Session, palette: &Palette) -> io::Result<()> {
    let question = session.current_question();
    let record = session.current_record();

    write!(
        out,
        "\nQuestion: {} / {}",
        session.current_index() + 1,
        session.len()
    )?;
    if session.is_random_order() {
        write!(out, " (Original Q.{})", question.original_number)?;
    }
    writeln!(out, "    Score: {}", session.score())?;
    writeln!(out)?;
    writeln!(out, "{}", question.text)?;
    writeln!(out)?;

    for (key, text) in question.sorted_options() {
        let line = format!("  {key}. {text}");
        let line = if record.locked && key == question.correct_key {
            palette.paint(&format!("{line}  [correct]"), Role::Correct)
        } else if !record.locked && record.final_selection == Some(key) {
            palette.paint(&format!("{line}  [wrong]"), Role::Wrong)
        } else {
            line
        };
        writeln!(out, "{line}")?;
    }

    if session.is_last() {
        let skipped = session.skipped_questions();
        if !skipped.is_empty() {
            let list = skipped
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                palette.paint(
                    &format!("Answer skipped questions to finish: {list}"),
                    Role::Wrong
                )
            )?;
        }
    }
    Ok(())
}

/// Print every question's position, original number and status.
pub fn render_navigator(out: &mut impl Write, session: &Session, palette: &Palette) -> io::Result<()> {
    for (index, (question, record)) in session
        .questions()
        .iter()
        .zip(session.records())
        .enumerate()
    {
        let marker = if index == session.current_index() {
            '>'
        } else {
            ' '
        };
        let status = if record.first_try_correct {
            palette.paint("correct", Role::Correct)
        } else if record.final_selection.is_some() {
            palette.paint("wrong", Role::Wrong)
        } else {
            palette.paint("unanswered", Role::Neutral)
        };
        writeln!(
            out,
            "{marker} {:>3}. Q {:<4} {status}",
            index + 1,
            question.original_number
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::{OptionKey, QuizEngine};

    const BANK: &str = "Q1\nA) a\nB) b\nC) c\nD) d\nE) e\nAnswer: C\n\nQ2\nA) a\nB) b\nC) c\nD) d\nE) e\nAnswer: A";

    fn engine() -> QuizEngine {
        let mut engine = QuizEngine::new(false);
        engine.start(synapse_core::parser::parse(BANK).unwrap()).unwrap();
        engine
    }

    fn rendered(engine: &QuizEngine) -> String {
        let mut out = Vec::new();
        render_question(&mut out, engine.session().unwrap(), &Palette::plain()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn question_marks_wrong_then_correct() {
        let mut engine = engine();
        engine.select_option(OptionKey::A).unwrap();
        let text = rendered(&engine);
        assert!(text.contains("Question: 1 / 2    Score: 0"));
        assert!(text.contains("  A. a  [wrong]"));

        engine.select_option(OptionKey::C).unwrap();
        let text = rendered(&engine);
        assert!(text.contains("  C. c  [correct]"));
        assert!(!text.contains("[wrong]"));
    }

    #[test]
    fn last_question_lists_skipped() {
        let mut engine = engine();
        engine.jump_to(1).unwrap();
        let text = rendered(&engine);
        assert!(text.contains("Answer skipped questions to finish: 1, 2"));
    }

    #[test]
    fn navigator_lines() {
        let mut engine = engine();
        engine.select_option(OptionKey::C).unwrap();
        let mut out = Vec::new();
        render_navigator(&mut out, engine.session().unwrap(), &Palette::plain()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(">   1. Q 1    correct"));
        assert!(text.contains("    2. Q 2    unanswered"));
    }

    #[test]
    fn palette_paints_only_when_enabled() {
        let theme = Theme::default_theme();
        assert_eq!(Palette::new(theme, false).paint("x", Role::Correct), "x");
        assert_eq!(
            Palette::new(theme, true).paint("x", Role::Correct),
            "\x1b[38;2;39;174;96mx\x1b[0m"
        );
    }
}
