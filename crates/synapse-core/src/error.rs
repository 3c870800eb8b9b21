//! Quiz error types.
//!
//! Every error here is recoverable: the operation that produced it has left
//! the engine exactly as it was before the call.

use thiserror::Error;

/// What was wrong with a single question block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockDefect {
    #[error("No question text found.")]
    NoQuestionText,

    #[error("Expected 5 options (A-E), found {found}.")]
    WrongOptionCount { found: usize },

    #[error("No 'Answer:' line found.")]
    MissingAnswer,

    #[error("Answer '{answer}' is not a valid option key.")]
    InvalidAnswerKey { answer: String },
}

/// Errors produced while turning raw text into questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A block could not be turned into a question.
    #[error("Could not parse question block #{block}: {defect}")]
    Block { block: usize, defect: BlockDefect },

    /// The input held no question blocks at all.
    #[error("No valid questions could be parsed from the input.")]
    EmptyInput,
}

impl ParseError {
    /// 1-based position of the offending block, if any.
    pub fn block(&self) -> Option<usize> {
        match self {
            ParseError::Block { block, .. } => Some(*block),
            ParseError::EmptyInput => None,
        }
    }
}

/// Errors produced by session state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `retake` with nothing loaded.
    #[error("No quiz loaded to retake.")]
    NoActiveQuiz,

    /// `start` with an empty question list.
    #[error("Cannot start a quiz without questions.")]
    EmptyInput,

    /// Finishing was attempted while some questions have no selection.
    #[error("Answer skipped questions to finish: {}", join_numbers(.skipped))]
    NavigationRefused { skipped: Vec<usize> },

    #[error("No question at index {index} (quiz has {len} questions).")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation needs a session that is being answered.
    #[error("No quiz is in progress.")]
    NotActive,

    /// Order mode can only change before a quiz starts.
    #[error("Order mode cannot change while a quiz is loaded.")]
    SessionInProgress,
}

impl SessionError {
    /// Original numbers of skipped questions for a refused finish.
    pub fn skipped(&self) -> &[usize] {
        match self {
            SessionError::NavigationRefused { skipped } => skipped,
            _ => &[],
        }
    }
}

/// Any error surfaced through intent dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

fn join_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_error_message_names_block() {
        let err = ParseError::Block {
            block: 3,
            defect: BlockDefect::WrongOptionCount { found: 4 },
        };
        assert_eq!(
            err.to_string(),
            "Could not parse question block #3: Expected 5 options (A-E), found 4."
        );
        assert_eq!(err.block(), Some(3));
        assert_eq!(ParseError::EmptyInput.block(), None);
    }

    #[test]
    fn navigation_refused_lists_numbers() {
        let err = SessionError::NavigationRefused {
            skipped: vec![2, 5],
        };
        assert_eq!(err.to_string(), "Answer skipped questions to finish: 2, 5");
        assert_eq!(err.skipped(), &[2, 5]);
        assert!(SessionError::NotActive.skipped().is_empty());
    }

    #[test]
    fn quiz_error_is_transparent() {
        let err: QuizError = SessionError::NoActiveQuiz.into();
        assert_eq!(err.to_string(), "No quiz loaded to retake.");
    }
}
