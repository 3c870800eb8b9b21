//! A single quiz attempt.
//!
//! A [`Session`] pairs the questions in presentation order with one
//! [`AnswerRecord`] each. It is always built fresh from the immutable
//! question list, so retaking a quiz never shares answer state.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{AnswerRecord, OptionKey, Question};

/// Result of selecting an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The correct key was chosen and the question is now locked.
    Correct { first_try: bool },
    /// A wrong key was chosen; further attempts are allowed.
    Incorrect,
    /// The question was already locked; nothing changed.
    Ignored,
}

/// Where `go_next` left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given index.
    Moved(usize),
    /// The last question was passed with nothing skipped.
    Finished,
}

/// Answer state for one run through a question list.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    questions: Vec<Arc<Question>>,
    records: Vec<AnswerRecord>,
    current: usize,
    score: usize,
    random_order: bool,
}

impl Session {
    /// Build a session over `questions`, shuffling them when `random_order` is set.
    ///
    /// Fails with [`SessionError::EmptyInput`] when there is nothing to answer.
    pub fn new<R: Rng + ?Sized>(
        questions: &[Arc<Question>],
        random_order: bool,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let mut questions = questions.to_vec();
        if random_order {
            questions.shuffle(rng);
        }
        let records = vec![AnswerRecord::default(); questions.len()];

        Ok(Self {
            id: Uuid::new_v4(),
            questions,
            records,
            current: 0,
            score: 0,
            random_order,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    /// Answer records, index-aligned with [`questions`](Self::questions).
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_record(&self) -> &AnswerRecord {
        &self.records[self.current]
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_random_order(&self) -> bool {
        self.random_order
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Record a selection for the current question.
    pub fn select_option(&mut self, key: OptionKey) -> Selection {
        let question = &self.questions[self.current];
        let record = &mut self.records[self.current];
        if record.locked {
            return Selection::Ignored;
        }

        let first_attempt = record.selection_history.is_empty();
        record.selection_history.push(key);
        record.final_selection = Some(key);
        record.attempt_count += 1;

        if !question.is_correct(key) {
            return Selection::Incorrect;
        }

        if first_attempt {
            record.first_try_correct = true;
            self.score += 1;
        }
        record.locked = true;
        Selection::Correct {
            first_try: first_attempt,
        }
    }

    /// Original numbers of questions with no selection, in presentation order.
    pub fn skipped_questions(&self) -> Vec<usize> {
        self.questions
            .iter()
            .zip(&self.records)
            .filter(|(_, r)| r.is_skipped())
            .map(|(q, _)| q.original_number)
            .collect()
    }

    /// Advance one question, or finish when on the last one.
    pub fn go_next(&mut self) -> Result<Advance, SessionError> {
        if !self.is_last() {
            self.current += 1;
            return Ok(Advance::Moved(self.current));
        }

        let skipped = self.skipped_questions();
        if skipped.is_empty() {
            Ok(Advance::Finished)
        } else {
            Err(SessionError::NavigationRefused { skipped })
        }
    }

    /// Step back one question, staying put at the start.
    pub fn go_previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.questions.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Session index holding this exact question, by pointer identity.
    pub fn position_of(&self, question: &Arc<Question>) -> Option<usize> {
        self.questions.iter().position(|q| Arc::ptr_eq(q, question))
    }
}
