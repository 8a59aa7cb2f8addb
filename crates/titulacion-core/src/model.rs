//! Core data model types for titulacion.
//!
//! Questions, typed answer values, the answer store that accumulates them,
//! and the verdict returned by the evaluation service.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationRejected;

/// Upper bound for integer (percentage) answers.
pub const MAX_PERCENTAGE: u8 = 100;

/// The input type a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Boolean,
    Integer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Boolean => write!(f, "boolean"),
            QuestionType::Integer => write!(f, "integer"),
        }
    }
}

/// A single entry of the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Stable identifier, also the JSON key sent to the evaluation service.
    pub key: &'static str,
    /// Prompt shown to the user.
    pub text: &'static str,
    /// Expected answer type.
    #[serde(rename = "type")]
    pub kind: QuestionType,
}

impl Question {
    /// Check that `value` belongs to this question's domain.
    pub fn check(&self, value: &AnswerValue) -> Result<(), ValidationRejected> {
        match (self.kind, value) {
            (QuestionType::Boolean, AnswerValue::Bool(_)) => Ok(()),
            (QuestionType::Integer, AnswerValue::Integer(n)) if *n <= MAX_PERCENTAGE => Ok(()),
            (QuestionType::Integer, AnswerValue::Integer(n)) => {
                Err(ValidationRejected::OutOfRange { value: i64::from(*n) })
            }
            (expected, found) => Err(ValidationRejected::TypeMismatch {
                expected,
                found: found.kind(),
            }),
        }
    }
}

/// A typed answer. Serialized as a bare JSON boolean or number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Integer(u8),
}

impl AnswerValue {
    pub fn kind(&self) -> QuestionType {
        match self {
            AnswerValue::Bool(_) => QuestionType::Boolean,
            AnswerValue::Integer(_) => QuestionType::Integer,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            AnswerValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<u8> {
        match self {
            AnswerValue::Integer(n) => Some(*n),
            AnswerValue::Bool(_) => None,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<u8> for AnswerValue {
    fn from(value: u8) -> Self {
        AnswerValue::Integer(value)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(true) => write!(f, "Sí"),
            AnswerValue::Bool(false) => write!(f, "No"),
            AnswerValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// A confirmed answer reported by a question presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub key: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(key: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Mapping from question key to its answer.
///
/// Keys are kept sorted, so two equal stores always serialize to the same
/// bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<AnswerValue> {
        self.values.get(key).copied()
    }

    /// Set (or overwrite) the value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Catalog keys that have no value yet, in catalog order.
    pub fn missing_keys(&self, catalog: &[Question]) -> Vec<&'static str> {
        catalog
            .iter()
            .filter(|q| !self.values.contains_key(q.key))
            .map(|q| q.key)
            .collect()
    }

    pub fn is_complete(&self, catalog: &[Question]) -> bool {
        self.missing_keys(catalog).is_empty()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Verdict produced by the evaluation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Whether every graduation requirement is met.
    pub passed: bool,
    /// Unmet conditions, in the order the service reported them.
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl EvaluationResult {
    pub fn passed() -> Self {
        Self {
            passed: true,
            reasons: Vec::new(),
        }
    }

    pub fn failed(reasons: Vec<String>) -> Self {
        Self {
            passed: false,
            reasons,
        }
    }
}
