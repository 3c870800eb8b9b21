//! synapse-core — question parser, quiz session engine, and report builder.
//!
//! This crate defines the question model, the session state machine that
//! tracks answers, and the summaries and review reports derived from it.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;

pub use engine::{Intent, Notice, Phase, QuizEngine};
pub use error::{BlockDefect, ParseError, QuizError, SessionError};
pub use model::{AnswerRecord, OptionKey, Question};
pub use report::{DetailedReport, ReportEntry, Summary};
pub use session::{Advance, Selection, Session};
