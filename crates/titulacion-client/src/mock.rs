//! Mock evaluator for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use titulacion_core::model::{AnswerStore, EvaluationResult};
use titulacion_core::traits::Evaluator;

use crate::error::ClientError;

/// A scripted outcome for one call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Verdict(EvaluationResult),
    /// Behave like a service answering with this HTTP status.
    Status(u16),
    /// Behave like an unreachable service.
    Unreachable,
}

/// An evaluator that replays scripted outcomes without any network.
///
/// Once the script is exhausted every call returns the fallback outcome.
pub struct MockEvaluator {
    script: Mutex<VecDeque<MockOutcome>>,
    fallback: MockOutcome,
    call_count: AtomicU32,
    requests: Mutex<Vec<Vec<u8>>>,
}

impl MockEvaluator {
    pub fn new(script: Vec<MockOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: MockOutcome::Unreachable,
            call_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A mock that always returns the same verdict.
    pub fn with_fixed_verdict(result: EvaluationResult) -> Self {
        Self {
            fallback: MockOutcome::Verdict(result),
            ..Self::new(Vec::new())
        }
    }

    /// Number of calls made to this evaluator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// JSON bodies of every request, in call order.
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Evaluator for MockEvaluator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn evaluate(&self, answers: &AnswerStore) -> anyhow::Result<EvaluationResult> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::to_vec(answers)?;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(body);
        }

        let outcome = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| self.fallback.clone());

        match outcome {
            MockOutcome::Verdict(result) => Ok(result),
            MockOutcome::Status(status) => Err(ClientError::Status {
                status,
                body: String::new(),
            }
            .into()),
            MockOutcome::Unreachable => {
                Err(ClientError::Network("evaluation service not reachable".into()).into())
            }
        }
    }
}
