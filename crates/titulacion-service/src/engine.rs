//! Inference engine: checks the facts against every rule.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::rules::{Facts, Rule};

/// A rule the facts did not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    pub name: &'static str,
    pub message: &'static str,
}

/// Outcome of evaluating one set of facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Failed rules, in knowledge-base order.
    pub failed: Vec<RuleFailure>,
}

impl Evaluation {
    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }

    /// User-facing messages of the failed rules.
    pub fn reasons(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.message.to_string()).collect()
    }
}

pub struct InferenceEngine {
    rules: Vec<Rule>,
}

impl InferenceEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate every rule; a rule that cannot read its facts counts as failed.
    pub fn evaluate(&self, facts: &Facts) -> Evaluation {
        let failed = self
            .rules
            .iter()
            .filter(|rule| match rule.is_satisfied(facts) {
                Ok(satisfied) => !satisfied,
                Err(e) => {
                    warn!(rule = rule.name, "rule could not be evaluated: {e}");
                    true
                }
            })
            .map(|rule| RuleFailure {
                name: rule.name,
                message: rule.error_message,
            })
            .collect();

        Evaluation { failed }
    }

    /// Evaluate a decoded request body. Anything other than an object
    /// gives no readable facts, so every rule fails.
    pub fn evaluate_document(&self, document: &Value) -> Evaluation {
        match document {
            Value::Object(facts) => self.evaluate(facts),
            other => {
                warn!(body = %other, "facts are not a JSON object; failing every rule");
                Evaluation {
                    failed: self
                        .rules
                        .iter()
                        .map(|rule| RuleFailure {
                            name: rule.name,
                            message: rule.error_message,
                        })
                        .collect(),
                }
            }
        }
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(crate::rules::knowledge_base())
    }
}
