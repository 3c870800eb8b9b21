//! The `synapse take` command.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use synapse_core::{Intent, Notice, OptionKey, Phase, QuizEngine, Selection};
use synapse_prefs::config::load_preferences_from;
use synapse_prefs::Preferences;
use synapse_report::{write_report, ExportFormat};

use crate::render::{render_navigator, render_question, Palette, Role};

/// Where to write the detailed report once the quiz is finished.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub path: PathBuf,
    pub format: ExportFormat,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Intent(IntentCommand),
    List,
    Report,
    Help,
    Quit,
    Unknown(String),
}

/// Commands that map onto engine intents.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IntentCommand {
    Select(OptionKey),
    Next,
    Previous,
    /// 1-based position as shown on screen.
    Jump(usize),
    Retake,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let lower = line.to_lowercase();
    let mut words = lower.split_whitespace();
    let head = words.next().unwrap_or("");
    let arg = words.next();

    match head {
        "" | "n" | "next" => Command::Intent(IntentCommand::Next),
        "p" | "prev" | "back" => Command::Intent(IntentCommand::Previous),
        "j" | "jump" => match arg.and_then(|a| a.parse::<usize>().ok()) {
            Some(position) if position >= 1 => Command::Intent(IntentCommand::Jump(position)),
            _ => Command::Unknown(line.to_string()),
        },
        "retake" => Command::Intent(IntentCommand::Retake),
        "l" | "list" => Command::List,
        "r" | "report" => Command::Report,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "home" | "exit" => Command::Quit,
        other => match other.to_uppercase().parse::<OptionKey>() {
            Ok(key) => Command::Intent(IntentCommand::Select(key)),
            Err(_) => Command::Unknown(line.to_string()),
        },
    }
}

impl IntentCommand {
    fn into_intent(self) -> Intent {
        match self {
            IntentCommand::Select(key) => Intent::SelectOption(key),
            IntentCommand::Next => Intent::Next,
            IntentCommand::Previous => Intent::Previous,
            IntentCommand::Jump(position) => Intent::JumpTo(position - 1),
            IntentCommand::Retake => Intent::Retake,
        }
    }
}

const HELP: &str = "\
Commands:
  A-E        select an option
  n, Enter   next question (finishes on the last one)
  p, back    previous question
  j <n>      jump to question position n
  list       show all questions and their status
  report     show the detailed report (after finishing)
  retake     start the quiz again
  q          quit";

pub async fn execute(
    file: PathBuf,
    random_order: Option<bool>,
    export: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let prefs = load_preferences_from(config_path.as_deref())?;
    let random_order = random_order.unwrap_or(prefs.random_order);

    let export = export
        .map(|path| -> Result<ExportTarget> {
            let format = match &format {
                Some(f) => f.parse().map_err(|e: String| anyhow::anyhow!("{e}"))?,
                None => ExportFormat::from_path(&path),
            };
            Ok(ExportTarget { path, format })
        })
        .transpose()?;

    let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read question bank: {}", file.display()))?;

    let mut engine = QuizEngine::new(random_order);
    let stdout = std::io::stdout();
    let palette = Palette::new(prefs.theme(), stdout.is_terminal());
    let mut out = stdout.lock();

    let notice = engine
        .dispatch(Intent::Load(raw))
        .with_context(|| format!("failed to load {}", file.display()))?;
    announce(&mut out, &engine, &notice, &palette)?;

    run_session(
        &mut engine,
        std::io::stdin().lock(),
        &mut out,
        &palette,
        export.as_ref(),
        &prefs,
    )
}

/// Drive `engine` from line-based input until quit or end of input.
pub fn run_session(
    engine: &mut QuizEngine,
    input: impl BufRead,
    out: &mut impl Write,
    palette: &Palette,
    export: Option<&ExportTarget>,
    prefs: &Preferences,
) -> Result<()> {
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };

        match parse_command(&line) {
            Command::Intent(cmd) => match engine.dispatch(cmd.into_intent()) {
                Ok(notice) => {
                    announce(out, engine, &notice, palette)?;
                    if let (Notice::Finished(_), Some(target)) = (&notice, export) {
                        export_report(out, engine, target, prefs)?;
                    }
                }
                Err(e) => writeln!(out, "{}", palette.paint(&format!("! {e}"), Role::Wrong))?,
            },
            Command::List => match engine.session() {
                Some(session) => render_navigator(out, session, palette)?,
                None => writeln!(out, "! No quiz is loaded.")?,
            },
            Command::Report => match engine.phase() {
                Phase::Finished(_) => {
                    let report = engine.build_detailed_report()?;
                    writeln!(out, "{report}")?;
                }
                _ => writeln!(out, "! The report is available once the quiz is finished.")?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {
                engine.dispatch(Intent::Reset)?;
                writeln!(out, "Bye.")?;
                break;
            }
            Command::Unknown(text) => {
                writeln!(out, "! Unknown command '{text}'. Type 'help' for commands.")?
            }
        }
    }

    Ok(())
}

fn announce(
    out: &mut impl Write,
    engine: &QuizEngine,
    notice: &Notice,
    palette: &Palette,
) -> Result<()> {
    match notice {
        Notice::Started { questions } => {
            let order = if engine.is_random_order() {
                "random"
            } else {
                "original"
            };
            writeln!(out, "Loaded {questions} questions ({order} order). Type 'help' for commands.")?;
        }
        Notice::Answered(Selection::Correct { first_try }) => {
            let text = if *first_try {
                "Correct on the first attempt!"
            } else {
                "Correct."
            };
            writeln!(out, "{}", palette.paint(text, Role::Correct))?;
        }
        Notice::Answered(Selection::Incorrect) => {
            writeln!(out, "{}", palette.paint("Incorrect, try again.", Role::Wrong))?;
        }
        Notice::Answered(Selection::Ignored) => {
            writeln!(out, "This question is already answered correctly.")?;
            return Ok(());
        }
        Notice::Moved { .. } => {}
        Notice::Finished(summary) => {
            writeln!(out, "\nQuiz finished!\n{summary}")?;
            writeln!(out, "Type 'report' for the detailed report, 'retake' to try again, or 'q' to quit.")?;
            return Ok(());
        }
        Notice::Reset => return Ok(()),
    }

    if let Phase::Active(session) = engine.phase() {
        render_question(out, session, palette)?;
    }
    Ok(())
}

fn export_report(
    out: &mut impl Write,
    engine: &QuizEngine,
    target: &ExportTarget,
    prefs: &Preferences,
) -> Result<()> {
    let report = engine.build_detailed_report()?;
    write_report(
        &report,
        target.format,
        &target.path,
        prefs.theme(),
        prefs.font_size,
    )?;
    tracing::info!("report written to {}", target.path.display());
    writeln!(out, "Report written to {}", target.path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const BANK: &str = "\
Which structure separates the false pelvis from the true pelvis?
A) Anterior superior iliac spine
B) Iliac crest
C) Iliac fossa
D) Pelvic brim
E) Pubic tubercle
Answer: D

In anatomical position, the anterior superior iliac spine aligns with which bony prominence?
A) Iliac crest
B) Ischial spine
C) Ischial tuberosity
D) Pubic ramus
E) Pubic tubercle
Answer: E
";

    fn run(script: &str, export: Option<&ExportTarget>) -> (QuizEngine, String) {
        let mut engine = QuizEngine::new(false);
        engine.dispatch(Intent::Load(BANK.into())).unwrap();
        let mut out = Vec::new();
        run_session(
            &mut engine,
            Cursor::new(script.to_string()),
            &mut out,
            &Palette::plain(),
            export,
            &Preferences::default(),
        )
        .unwrap();
        (engine, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse_command("d"),
            Command::Intent(IntentCommand::Select(OptionKey::D))
        );
        assert_eq!(parse_command("  "), Command::Intent(IntentCommand::Next));
        assert_eq!(parse_command("B"), Command::Intent(IntentCommand::Select(OptionKey::B)));
        assert_eq!(parse_command("b"), Command::Intent(IntentCommand::Select(OptionKey::B)));
        assert_eq!(parse_command("p"), Command::Intent(IntentCommand::Previous));
        assert_eq!(parse_command("back"), Command::Intent(IntentCommand::Previous));
        assert_eq!(parse_command("j 3"), Command::Intent(IntentCommand::Jump(3)));
        assert_eq!(parse_command("j 0"), Command::Unknown("j 0".into()));
        assert_eq!(parse_command("jump"), Command::Unknown("jump".into()));
        assert_eq!(parse_command("REPORT"), Command::Report);
        assert_eq!(parse_command("f"), Command::Unknown("f".into()));
        assert_eq!(parse_command("home"), Command::Quit);
    }

    #[test]
    fn full_run_finishes() {
        let (engine, out) = run("d\nn\na\ne\nn\nreport\nq\n", None);
        assert!(out.contains("Correct on the first attempt!"));
        assert!(out.contains("Incorrect, try again."));
        assert!(out.contains("Your total score: 1/2 (50.00%)"));
        assert!(out.contains("Questions wrong on first attempt: 2"));
        assert!(out.contains("- Answer Path: A -> E"));
        assert!(out.contains("Bye."));
        assert!(matches!(engine.phase(), Phase::Input));
    }

    #[test]
    fn finish_blocked_by_skip() {
        let (engine, out) = run("d\nn\nn\n", None);
        assert!(out.contains("! Answer skipped questions to finish: 2"));
        let session = engine.session().unwrap();
        assert_eq!(session.current_index(), 1);
        assert!(matches!(engine.phase(), Phase::Active(_)));
    }

    #[test]
    fn locked_question_ignores_input() {
        let (engine, out) = run("d\na\n", None);
        assert!(out.contains("already answered correctly"));
        assert_eq!(engine.session().unwrap().score(), 1);
        assert_eq!(engine.session().unwrap().records()[0].selection_history.len(), 1);
    }

    #[test]
    fn report_before_finish_is_refused() {
        let (_, out) = run("report\nlist\nj 9\n", None);
        assert!(out.contains("available once the quiz is finished"));
        assert!(out.contains(">   1. Q 1"));
        assert!(out.contains("! No question at index 8 (quiz has 2 questions)."));
    }

    #[test]
    fn retake_after_finish() {
        let (engine, out) = run("d\nn\ne\nn\nretake\n", None);
        assert!(out.contains("Your total score: 2/2 (100.00%)"));
        assert!(out.contains("Loaded 2 questions"));
        let session = engine.session().unwrap();
        assert_eq!(session.score(), 0);
        assert!(matches!(engine.phase(), Phase::Active(_)));
    }

    #[test]
    fn finished_quiz_rejects_answers() {
        let (_, out) = run("d\nn\ne\nn\na\n", None);
        assert!(out.contains("! No quiz is in progress."));
    }

    #[test]
    fn export_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let target = ExportTarget {
            path: dir.path().join("report.txt"),
            format: ExportFormat::Text,
        };
        let (_, out) = run("d\nn\ne\nn\n", Some(&target));
        assert!(out.contains("Report written to"));

        let text = std::fs::read_to_string(&target.path).unwrap();
        assert!(text.contains("[ Question 2 ]"));
        assert!(text.contains("- Correct Answer: E"));
    }
}
