//! Error taxonomy for the wizard.
//!
//! `ValidationRejected` stays inside the input controls, `WizardError` guards
//! the state machine, and `EvaluationUnavailable` is the single failure
//! outcome of a submission.

use thiserror::Error;

use crate::model::QuestionType;

/// A confirmation carried a value outside its question's domain.
///
/// Messages are shown to the user next to the input control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationRejected {
    /// A yes/no control was confirmed while still unset.
    #[error("Selecciona una opción")]
    Unanswered,

    /// A required numeric control was confirmed empty.
    #[error("Este campo es obligatorio")]
    Required,

    /// The numeric control held something that is not an integer.
    #[error("'{input}' no es un número entero")]
    NotANumber { input: String },

    /// The integer is outside `[0, 100]`.
    #[error("{value} está fuera del rango 0-100")]
    OutOfRange { value: i64 },

    /// The value's type does not match the question's declared type.
    #[error("se esperaba un valor {expected}, se recibió {found}")]
    TypeMismatch {
        expected: QuestionType,
        found: QuestionType,
    },
}

/// Errors raised when an event cannot be applied to the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The event has no transition from the current state.
    #[error("event '{event}' is not accepted in state '{state}'")]
    InvalidEvent {
        state: &'static str,
        event: &'static str,
    },

    /// An answer arrived for a question other than the one being shown.
    #[error("answer for '{got}' does not match the current question '{expected}'")]
    UnexpectedQuestion { expected: &'static str, got: String },

    /// The answer's value is outside the question's domain.
    #[error("answer for '{key}' rejected: {source}")]
    Rejected {
        key: String,
        #[source]
        source: ValidationRejected,
    },

    /// A wholesale submission is missing catalog keys.
    #[error("answer set is missing values for: {}", missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
}

/// The evaluation call failed as a whole (transport, status or body).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluation service unavailable: {reason}")]
pub struct EvaluationUnavailable {
    pub reason: String,
}
