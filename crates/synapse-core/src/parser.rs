//! Plain-text question bank parser.
//!
//! A bank is a sequence of blocks separated by blank lines. Each block holds
//! free question text, five `X) option` lines and one `Answer: X` line, in any
//! order.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::{BlockDefect, ParseError};
use crate::model::{OptionKey, Question};

/// Number of options every question must carry.
pub const OPTION_COUNT: usize = 5;

/// Classification of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `A) text` through `E) text`.
    Option(OptionKey, &'a str),
    /// `Answer: X`, label matched case-insensitively.
    Answer(&'a str),
    /// Anything else belongs to the question body.
    Text(&'a str),
}

/// Classify one already-trimmed line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let mut chars = line.chars();
    if let (Some(letter), Some(')')) = (chars.next(), chars.next()) {
        if let Some(key) = OptionKey::from_char(letter) {
            return LineKind::Option(key, line[2..].trim());
        }
    }

    const LABEL: &str = "answer:";
    if line
        .get(..LABEL.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(LABEL))
    {
        return LineKind::Answer(line[LABEL.len()..].trim());
    }

    LineKind::Text(line)
}

/// Collects the classified lines of one block.
#[derive(Debug, Default)]
struct BlockAccumulator<'a> {
    text_lines: Vec<&'a str>,
    options: BTreeMap<OptionKey, String>,
    answer: Option<&'a str>,
}

impl<'a> BlockAccumulator<'a> {
    fn push(&mut self, line: &'a str) {
        match classify_line(line) {
            LineKind::Option(key, text) => {
                self.options.insert(key, text.to_string());
            }
            LineKind::Answer(answer) => self.answer = Some(answer),
            LineKind::Text(text) => self.text_lines.push(text),
        }
    }

    fn is_empty(&self) -> bool {
        self.text_lines.is_empty() && self.options.is_empty() && self.answer.is_none()
    }

    fn finish(self, block: usize) -> Result<Question, ParseError> {
        let fail = |defect| ParseError::Block { block, defect };

        let text = self.text_lines.join("\n").trim().to_string();
        if text.is_empty() {
            return Err(fail(BlockDefect::NoQuestionText));
        }
        if self.options.len() != OPTION_COUNT {
            return Err(fail(BlockDefect::WrongOptionCount {
                found: self.options.len(),
            }));
        }
        let answer = match self.answer {
            Some(a) if !a.is_empty() => a,
            _ => return Err(fail(BlockDefect::MissingAnswer)),
        };
        let correct_key = answer
            .parse::<OptionKey>()
            .ok()
            .filter(|key| self.options.contains_key(key))
            .ok_or_else(|| {
                fail(BlockDefect::InvalidAnswerKey {
                    answer: answer.to_string(),
                })
            })?;

        Ok(Question {
            text,
            options: self.options,
            correct_key,
            original_number: block,
        })
    }
}

/// Parse a question bank into questions numbered by block position.
pub fn parse(raw_text: &str) -> Result<Vec<Question>, ParseError> {
    let mut questions = Vec::new();
    let mut current = BlockAccumulator::default();

    for line in raw_text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                let block = questions.len() + 1;
                questions.push(std::mem::take(&mut current).finish(block)?);
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        let block = questions.len() + 1;
        questions.push(current.finish(block)?);
    }

    if questions.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    tracing::debug!(count = questions.len(), "parsed question bank");
    Ok(questions)
}

/// Read and parse a question bank file.
pub fn parse_file(path: &Path) -> Result<Vec<Question>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// A non-fatal issue found in an otherwise valid question bank.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Original number of the question (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check parsed questions for likely authoring mistakes.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_text = HashSet::new();
    for q in questions {
        if !seen_text.insert(q.text.as_str()) {
            warnings.push(ValidationWarning {
                question: Some(q.original_number),
                message: "duplicate question text".into(),
            });
        }
    }

    for q in questions {
        let mut seen_options = HashSet::new();
        for (key, text) in q.sorted_options() {
            if !text.is_empty() && !seen_options.insert(text) {
                warnings.push(ValidationWarning {
                    question: Some(q.original_number),
                    message: format!("option {key} repeats the text of an earlier option"),
                });
            }
        }
    }

    for q in questions {
        if q.options.values().any(|text| text.is_empty()) {
            warnings.push(ValidationWarning {
                question: Some(q.original_number),
                message: "one or more options have no text".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = "Q1\nA) a\nB) b\nC) c\nD) d\nE) e\nAnswer: C";

    const TWO_BLOCKS: &str = "\
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

    fn block_of(err: ParseError) -> (usize, BlockDefect) {
        match err {
            ParseError::Block { block, defect } => (block, defect),
            other => panic!("expected block error, got {other:?}"),
        }
    }

    #[test]
    fn classify_lines() {
        assert_eq!(classify_line("A) a"), LineKind::Option(OptionKey::A, "a"));
        assert_eq!(classify_line("E)tight"), LineKind::Option(OptionKey::E, "tight"));
        assert_eq!(classify_line("C)"), LineKind::Option(OptionKey::C, ""));
        assert_eq!(classify_line("Answer: D"), LineKind::Answer("D"));
        assert_eq!(classify_line("ANSWER:B"), LineKind::Answer("B"));
        assert_eq!(classify_line("answer:   "), LineKind::Answer(""));
        assert_eq!(classify_line("F) nope"), LineKind::Text("F) nope"));
        assert_eq!(classify_line("a) lower"), LineKind::Text("a) lower"));
        assert_eq!(classify_line("Answers are below"), LineKind::Text("Answers are below"));
        assert_eq!(classify_line("é) accent"), LineKind::Text("é) accent"));
    }

    #[test]
    fn parse_single_question() {
        let questions = parse(SINGLE).unwrap();
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.text, "Q1");
        assert_eq!(q.correct_key, OptionKey::C);
        assert_eq!(q.original_number, 1);
        assert_eq!(q.options[&OptionKey::E], "e");
    }

    #[test]
    fn parse_numbers_blocks_in_order() {
        let questions = parse(TWO_BLOCKS).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].original_number, 1);
        assert_eq!(questions[1].original_number, 2);
        assert_eq!(questions[1].correct_key, OptionKey::E);
    }

    #[test]
    fn blank_lines_with_whitespace_separate_blocks() {
        let input = format!("\n\n{SINGLE}\n   \n\t\n{SINGLE}\n\n\n");
        let questions = parse(&input).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].original_number, 2);
    }

    #[test]
    fn multi_line_question_text_and_interleaving() {
        let input = "First line\nA) a\nSecond line\nB) b\nC) c\nAnswer: a-ignored\nD) d\nE) e\nAnswer: B";
        let questions = parse(input).unwrap();
        assert_eq!(questions[0].text, "First line\nSecond line");
        assert_eq!(questions[0].correct_key, OptionKey::B);
    }

    #[test]
    fn duplicate_option_last_wins() {
        let input = "Q\nA) first\nA) second\nB) b\nC) c\nD) d\nE) e\nAnswer: A";
        let questions = parse(input).unwrap();
        assert_eq!(questions[0].options[&OptionKey::A], "second");
    }

    #[test]
    fn crlf_input() {
        let input = SINGLE.replace('\n', "\r\n");
        assert_eq!(parse(&input).unwrap().len(), 1);
    }

    #[test]
    fn missing_question_text() {
        let input = format!("{SINGLE}\n\nA) a\nB) b\nC) c\nD) d\nE) e\nAnswer: A");
        let (block, defect) = block_of(parse(&input).unwrap_err());
        assert_eq!(block, 2);
        assert_eq!(defect, BlockDefect::NoQuestionText);
    }

    #[test]
    fn wrong_option_count() {
        let input = "Q\nA) a\nB) b\nC) c\nD) d\nAnswer: A";
        let (block, defect) = block_of(parse(input).unwrap_err());
        assert_eq!(block, 1);
        assert_eq!(defect, BlockDefect::WrongOptionCount { found: 4 });
    }

    #[test]
    fn missing_answer_line() {
        let input = format!("{SINGLE}\n\n{SINGLE}\n\nQ3\nA) a\nB) b\nC) c\nD) d\nE) e");
        let (block, defect) = block_of(parse(&input).unwrap_err());
        assert_eq!(block, 3);
        assert_eq!(defect, BlockDefect::MissingAnswer);
    }

    #[test]
    fn empty_answer_counts_as_missing() {
        let input = "Q\nA) a\nB) b\nC) c\nD) d\nE) e\nAnswer:";
        let (_, defect) = block_of(parse(input).unwrap_err());
        assert_eq!(defect, BlockDefect::MissingAnswer);
    }

    #[test]
    fn answer_not_an_option() {
        for answer in ["F", "c", "AB"] {
            let input = format!("Q\nA) a\nB) b\nC) c\nD) d\nE) e\nAnswer: {answer}");
            let (block, defect) = block_of(parse(&input).unwrap_err());
            assert_eq!(block, 1);
            assert_eq!(
                defect,
                BlockDefect::InvalidAnswerKey {
                    answer: answer.to_string()
                }
            );
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse("").unwrap_err(), ParseError::EmptyInput);
        assert_eq!(parse("  \n\n \t\n").unwrap_err(), ParseError::EmptyInput);
    }

    #[test]
    fn many_blocks_numbered() {
        let input = (0..25).map(|_| SINGLE).collect::<Vec<_>>().join("\n\n");
        let questions = parse(&input).unwrap();
        assert_eq!(questions.len(), 25);
        for (i, q) in questions.iter().enumerate() {
            assert_eq!(q.original_number, i + 1);
        }
    }

    #[test]
    fn validate_duplicates() {
        let input = format!("{SINGLE}\n\n{SINGLE}\n\nQ3\nA) same\nB) same\nC) c\nD) d\nE) e\nAnswer: C");
        let questions = parse(&input).unwrap();
        let warnings = validate_questions(&questions);
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(2) && w.message.contains("duplicate question")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(3) && w.message.contains("option B")));
    }

    #[test]
    fn validate_clean_bank() {
        let questions = parse(TWO_BLOCKS).unwrap();
        assert!(validate_questions(&questions).is_empty());
    }

    #[test]
    fn parse_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        std::fs::write(&path, TWO_BLOCKS).unwrap();

        assert_eq!(parse_file(&path).unwrap().len(), 2);
        assert!(parse_file(&dir.path().join("missing.txt")).is_err());
    }
}
