//! Quiz lifecycle owner.
//!
//! [`QuizEngine`] holds the immutable question list loaded by the user and the
//! current phase. UI layers either call its methods directly or feed it
//! [`Intent`]s through [`QuizEngine::dispatch`] and render the returned
//! [`Notice`].

use std::sync::Arc;

use rand::Rng;

use crate::error::{QuizError, SessionError};
use crate::model::{OptionKey, Question};
use crate::parser;
use crate::report::{build_detailed_report, build_summary, DetailedReport, Summary};
use crate::session::{Advance, Selection, Session};

/// Coarse lifecycle state.
#[derive(Debug, Clone)]
pub enum Phase {
    /// Nothing loaded.
    Input,
    /// Questions are being answered.
    Active(Session),
    /// Every question has a selection and the user moved past the last one.
    Finished(Session),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Input => "input",
            Phase::Active(_) => "active",
            Phase::Finished(_) => "finished",
        }
    }
}

/// A user action the engine can react to.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Parse raw text and start a quiz from it.
    Load(String),
    /// Start a quiz from already parsed questions.
    Start(Vec<Question>),
    SelectOption(OptionKey),
    Next,
    Previous,
    JumpTo(usize),
    Retake,
    Reset,
}

/// What the UI should tell the user after an intent succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A session began with this many questions.
    Started { questions: usize },
    Answered(Selection),
    /// The current question changed.
    Moved { index: usize },
    Finished(Summary),
    Reset,
}

/// Owns the loaded question list and the session built from it.
#[derive(Debug)]
pub struct QuizEngine {
    random_order: bool,
    original: Vec<Arc<Question>>,
    phase: Phase,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new(false)
    }
}

impl QuizEngine {
    pub fn new(random_order: bool) -> Self {
        Self {
            random_order,
            original: Vec::new(),
            phase: Phase::Input,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_random_order(&self) -> bool {
        self.random_order
    }

    /// The question list as loaded, in source order.
    pub fn original_questions(&self) -> &[Arc<Question>] {
        &self.original
    }

    /// The session being answered or just finished.
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Input => None,
            Phase::Active(s) | Phase::Finished(s) => Some(s),
        }
    }

    /// Change order mode. Only allowed while nothing is loaded.
    pub fn set_random_order(&mut self, random_order: bool) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::Input) {
            return Err(SessionError::SessionInProgress);
        }
        self.random_order = random_order;
        Ok(())
    }

    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        self.start_with_rng(questions, &mut rand::rng())
    }

    /// Load `questions` as the new original list and begin a session.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        questions: Vec<Question>,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        let original: Vec<Arc<Question>> = questions.into_iter().map(Arc::new).collect();
        self.begin(&original, rng)?;
        self.original = original;
        Ok(())
    }

    pub fn retake(&mut self) -> Result<(), SessionError> {
        self.retake_with_rng(&mut rand::rng())
    }

    /// Begin a fresh session over the loaded questions.
    pub fn retake_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if self.original.is_empty() {
            return Err(SessionError::NoActiveQuiz);
        }
        let original = std::mem::take(&mut self.original);
        let started = self.begin(&original, rng);
        self.original = original;
        started
    }

    fn begin<R: Rng + ?Sized>(
        &mut self,
        questions: &[Arc<Question>],
        rng: &mut R,
    ) -> Result<(), SessionError> {
        let session = Session::new(questions, self.random_order, rng)?;
        tracing::info!(
            session = %session.id(),
            questions = session.len(),
            random_order = self.random_order,
            "quiz session started"
        );
        self.phase = Phase::Active(session);
        Ok(())
    }

    /// Drop the session and the loaded questions.
    pub fn reset(&mut self) {
        if let Some(session) = self.session() {
            tracing::info!(session = %session.id(), "quiz session discarded");
        }
        self.original.clear();
        self.phase = Phase::Input;
    }

    fn active_mut(&mut self) -> Result<&mut Session, SessionError> {
        match &mut self.phase {
            Phase::Active(session) => Ok(session),
            _ => Err(SessionError::NotActive),
        }
    }

    pub fn select_option(&mut self, key: OptionKey) -> Result<Selection, SessionError> {
        let session = self.active_mut()?;
        let outcome = session.select_option(key);
        tracing::debug!(
            session = %session.id(),
            index = session.current_index(),
            %key,
            ?outcome,
            score = session.score(),
            "option selected"
        );
        Ok(outcome)
    }

    /// Move forward, finishing the quiz from the last question.
    pub fn go_next(&mut self) -> Result<Advance, SessionError> {
        let session = self.active_mut()?;
        let advance = match session.go_next() {
            Ok(advance) => advance,
            Err(e) => {
                tracing::debug!(session = %session.id(), "finish refused: {e}");
                return Err(e);
            }
        };

        if advance == Advance::Finished {
            if let Phase::Active(session) = std::mem::replace(&mut self.phase, Phase::Input) {
                tracing::info!(
                    session = %session.id(),
                    score = session.score(),
                    total = session.len(),
                    "quiz session finished"
                );
                self.phase = Phase::Finished(session);
            }
        }
        Ok(advance)
    }

    pub fn go_previous(&mut self) -> Result<usize, SessionError> {
        Ok(self.active_mut()?.go_previous())
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.active_mut()?.jump_to(index)
    }

    pub fn build_summary(&self) -> Result<Summary, SessionError> {
        self.session()
            .map(build_summary)
            .ok_or(SessionError::NotActive)
    }

    pub fn build_detailed_report(&self) -> Result<DetailedReport, SessionError> {
        self.session()
            .map(|s| build_detailed_report(&self.original, s))
            .ok_or(SessionError::NotActive)
    }

    /// Apply one intent and describe its effect.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Notice, QuizError> {
        tracing::debug!(phase = self.phase.name(), ?intent, "dispatching intent");

        let notice = match intent {
            Intent::Load(text) => {
                let questions = parser::parse(&text)?;
                self.start(questions)?;
                self.started()
            }
            Intent::Start(questions) => {
                self.start(questions)?;
                self.started()
            }
            Intent::Retake => {
                self.retake()?;
                self.started()
            }
            Intent::SelectOption(key) => Notice::Answered(self.select_option(key)?),
            Intent::Next => match self.go_next()? {
                Advance::Moved(index) => Notice::Moved { index },
                Advance::Finished => Notice::Finished(self.build_summary()?),
            },
            Intent::Previous => Notice::Moved {
                index: self.go_previous()?,
            },
            Intent::JumpTo(index) => {
                self.jump_to(index)?;
                Notice::Moved { index }
            }
            Intent::Reset => {
                self.reset();
                Notice::Reset
            }
        };
        Ok(notice)
    }

    fn started(&self) -> Notice {
        Notice::Started {
            questions: self.original.len(),
        }
    }
}
