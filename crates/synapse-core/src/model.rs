//! Core data model types for synapse.
//!
//! Questions are immutable once parsed. Answer records are the only mutable
//! per-question state and live inside a [`Session`](crate::session::Session).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five fixed option identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
    E,
}

impl OptionKey {
    /// All keys in display order.
    pub const ALL: [OptionKey; 5] = [
        OptionKey::A,
        OptionKey::B,
        OptionKey::C,
        OptionKey::D,
        OptionKey::E,
    ];

    /// Map an upper-case letter to its key.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionKey::A),
            'B' => Some(OptionKey::B),
            'C' => Some(OptionKey::C),
            'D' => Some(OptionKey::D),
            'E' => Some(OptionKey::E),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionKey::A => 'A',
            OptionKey::B => 'B',
            OptionKey::C => 'C',
            OptionKey::D => 'D',
            OptionKey::E => 'E',
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionKey {
    type Err = String;

    /// Strict: exactly one upper-case letter `A`-`E`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                OptionKey::from_char(c).ok_or_else(|| format!("unknown option key: {s}"))
            }
            _ => Err(format!("unknown option key: {s}")),
        }
    }
}

/// A parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question body, possibly spanning several lines.
    pub text: String,
    /// Option text keyed by option letter. Always holds all five keys.
    pub options: BTreeMap<OptionKey, String>,
    /// The correct option.
    pub correct_key: OptionKey,
    /// 1-based position of the question in the source text.
    pub original_number: usize,
}

impl Question {
    /// Option entries in key order.
    pub fn sorted_options(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        self.options.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.correct_key == key
    }
}

/// Per-question answer state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Number of accepted selections.
    pub attempt_count: u32,
    /// True only if the very first selection was the correct key.
    pub first_try_correct: bool,
    /// Most recent selection, `None` while unanswered.
    pub final_selection: Option<OptionKey>,
    /// Set once the correct key has been selected.
    pub locked: bool,
    /// Every accepted selection in chronological order.
    pub selection_history: Vec<OptionKey>,
}

impl AnswerRecord {
    /// A question with no selection at all counts as skipped.
    pub fn is_skipped(&self) -> bool {
        self.final_selection.is_none()
    }

    /// Answered at least once without a first-try hit.
    pub fn is_first_attempt_wrong(&self) -> bool {
        !self.first_try_correct && self.final_selection.is_some()
    }
}
