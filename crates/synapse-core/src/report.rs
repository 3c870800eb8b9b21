//! Score summaries and the detailed review report.
//!
//! Everything here is a pure function of a finished (or in-progress)
//! [`Session`] and the original question list; nothing is mutated.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{OptionKey, Question};
use crate::session::Session;

/// Headline numbers for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Questions answered correctly on the first attempt.
    pub score: usize,
    pub total: usize,
    /// `score / total * 100`, zero for an empty session.
    pub percentage: f64,
    /// Original numbers of questions answered but missed on the first attempt.
    pub first_attempt_wrong: Vec<usize>,
}

impl Summary {
    /// Percentage with two decimals, e.g. `50.00`.
    pub fn percentage_display(&self) -> String {
        format!("{:.2}", self.percentage)
    }

    fn wrong_list(&self) -> String {
        if self.first_attempt_wrong.is_empty() {
            "None".to_string()
        } else {
            self.first_attempt_wrong
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Your total score: {}/{} ({}%)",
            self.score,
            self.total,
            self.percentage_display()
        )?;
        write!(f, "Questions wrong on first attempt: {}", self.wrong_list())
    }
}

/// Compute the summary for a session.
pub fn build_summary(session: &Session) -> Summary {
    let total = session.len();
    let score = session.score();
    let percentage = if total == 0 {
        0.0
    } else {
        score as f64 / total as f64 * 100.0
    };

    let first_attempt_wrong = session
        .questions()
        .iter()
        .zip(session.records())
        .filter(|(_, r)| r.is_first_attempt_wrong())
        .map(|(q, _)| q.original_number)
        .collect();

    Summary {
        score,
        total,
        percentage,
        first_attempt_wrong,
    }
}

/// One question's line in the detailed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub original_number: usize,
    pub first_try_correct: bool,
    /// Every selection in order; empty when never answered.
    pub answer_path: Vec<OptionKey>,
    pub correct_key: OptionKey,
    /// Question text with newlines flattened, present only for shuffled sessions.
    pub question_text: Option<String>,
}

impl ReportEntry {
    pub fn status(&self) -> &'static str {
        if self.first_try_correct {
            "CORRECT on first attempt"
        } else {
            "INCORRECT on first attempt"
        }
    }

    pub fn answer_path_display(&self) -> String {
        if self.answer_path.is_empty() {
            "Not Answered".to_string()
        } else {
            self.answer_path
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(" -> ")
        }
    }
}

/// Full review of a session in original question order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub random_order: bool,
    pub summary: Summary,
    pub entries: Vec<ReportEntry>,
}

/// Build the detailed report for `session`, ordered by the original list.
///
/// Questions in `original` that the session does not hold (by identity) are
/// left out.
pub fn build_detailed_report(original: &[Arc<Question>], session: &Session) -> DetailedReport {
    let random_order = session.is_random_order();

    let mut sorted: Vec<&Arc<Question>> = original.iter().collect();
    sorted.sort_by_key(|q| q.original_number);

    let entries = sorted
        .into_iter()
        .filter_map(|question| {
            let index = session.position_of(question)?;
            let record = &session.records()[index];
            Some(ReportEntry {
                original_number: question.original_number,
                first_try_correct: record.first_try_correct,
                answer_path: record.selection_history.clone(),
                correct_key: question.correct_key,
                question_text: random_order.then(|| question.text.replace('\n', " ")),
            })
        })
        .collect();

    DetailedReport {
        random_order,
        summary: build_summary(session),
        entries,
    }
}

impl DetailedReport {
    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- HOW TO READ THIS REPORT ---")?;
        writeln!(f, "This report summarizes the student's quiz performance.")?;
        writeln!(f)?;
        writeln!(
            f,
            "- [ SUMMARY ]: An overview of the student's score and performance."
        )?;
        writeln!(
            f,
            "- [ DETAILED ANALYSIS ]: A breakdown of each question the student answered."
        )?;
        writeln!(
            f,
            "- Status: Indicates if the student answered correctly on their first attempt."
        )?;
        writeln!(
            f,
            "- Answer Path: Shows all the options the student selected for a question, in order."
        )?;
        write!(f, "- Correct Answer: The correct option for the question.")?;
        if self.random_order {
            write!(
                f,
                "\n- Question Text: The full text of the question for reference."
            )?;
        }
        Ok(())
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        let id_label = if self.random_order {
            "Original IDs"
        } else {
            "IDs"
        };
        writeln!(f, "[ SUMMARY ]")?;
        writeln!(
            f,
            "- Score: {}/{} ({}%)",
            s.score,
            s.total,
            s.percentage_display()
        )?;
        writeln!(f, "- Correct (1st attempt): {}", s.score)?;
        writeln!(
            f,
            "- Incorrect (1st attempt): {}",
            s.first_attempt_wrong.len()
        )?;
        write!(f, "- Questions wrong ({id_label}): {}", s.wrong_list())
    }
}

impl fmt::Display for DetailedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        write!(f, "\n\n--- QUIZ REPORT ---\n\n")?;
        self.write_summary(f)?;
        write!(f, "\n\n---\n[ DETAILED ANALYSIS ]\n")?;

        // Entries are separated by one blank line; the last one runs straight
        // into the footer.
        for entry in &self.entries {
            writeln!(f)?;
            if self.random_order {
                writeln!(f, "[ Original Question ID: {} ]", entry.original_number)?;
            } else {
                writeln!(f, "[ Question {} ]", entry.original_number)?;
            }
            writeln!(f, "- Status: {}", entry.status())?;
            if let Some(text) = &entry.question_text {
                writeln!(f, "- Question Text: \"{text}\"")?;
            }
            writeln!(f, "- Answer Path: {}", entry.answer_path_display())?;
            writeln!(f, "- Correct Answer: {}", entry.correct_key)?;
        }

        write!(f, "--- END OF REPORT ---")
    }
}
