//! Input-control state for the question presenter.
//!
//! A draft holds what the control currently shows; confirming it either
//! produces a typed [`Answer`] or a [`ValidationRejected`] that keeps the
//! user on the same question.

use crate::error::ValidationRejected;
use crate::model::{Answer, AnswerValue, Question, QuestionType, MAX_PERCENTAGE};

/// Ternary yes/no control. `Unset` is distinct from `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolChoice {
    #[default]
    Unset,
    Yes,
    No,
}

impl BoolChoice {
    /// The choices that can be confirmed, in display order.
    pub const OPTIONS: [BoolChoice; 2] = [BoolChoice::Yes, BoolChoice::No];

    /// Seed the control from the store's current value.
    pub fn from_value(value: Option<AnswerValue>) -> Self {
        match value.and_then(|v| v.as_bool()) {
            Some(true) => BoolChoice::Yes,
            Some(false) => BoolChoice::No,
            None => BoolChoice::Unset,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoolChoice::Unset => "Selecciona una opción",
            BoolChoice::Yes => "Sí",
            BoolChoice::No => "No",
        }
    }

    pub fn confirm(self) -> Result<bool, ValidationRejected> {
        match self {
            BoolChoice::Yes => Ok(true),
            BoolChoice::No => Ok(false),
            BoolChoice::Unset => Err(ValidationRejected::Unanswered),
        }
    }
}

/// Parse the text of a required percentage field.
pub fn parse_percentage(raw: &str) -> Result<u8, ValidationRejected> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationRejected::Required);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationRejected::NotANumber {
            input: trimmed.to_string(),
        })?;
    if !(0..=i64::from(MAX_PERCENTAGE)).contains(&value) {
        return Err(ValidationRejected::OutOfRange { value });
    }
    Ok(value as u8)
}

/// What the input control for one question currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDraft {
    Choice(BoolChoice),
    Number(String),
}

impl InputDraft {
    pub fn for_question(question: &Question, current: Option<AnswerValue>) -> Self {
        match question.kind {
            QuestionType::Boolean => InputDraft::Choice(BoolChoice::from_value(current)),
            QuestionType::Integer => InputDraft::Number(
                current
                    .and_then(|v| v.as_integer())
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    pub fn kind(&self) -> QuestionType {
        match self {
            InputDraft::Choice(_) => QuestionType::Boolean,
            InputDraft::Number(_) => QuestionType::Integer,
        }
    }

    /// Coerce the draft into a typed answer for `question`.
    pub fn confirm(&self, question: &Question) -> Result<Answer, ValidationRejected> {
        let value = match (question.kind, self) {
            (QuestionType::Boolean, InputDraft::Choice(choice)) => {
                AnswerValue::Bool(choice.confirm()?)
            }
            (QuestionType::Integer, InputDraft::Number(raw)) => {
                AnswerValue::Integer(parse_percentage(raw)?)
            }
            (expected, draft) => {
                return Err(ValidationRejected::TypeMismatch {
                    expected,
                    found: draft.kind(),
                })
            }
        };
        Ok(Answer::new(question.key, value))
    }
}
