//! Seams between the wizard and the outside world.
//!
//! The evaluation service is reached through [`Evaluator`] (implemented in
//! `titulacion-client`); front ends implement [`QuestionPresenter`] and,
//! optionally, [`SubmissionObserver`].

use async_trait::async_trait;

use crate::controller::Submission;
use crate::error::EvaluationUnavailable;
use crate::model::{Answer, AnswerStore, AnswerValue, EvaluationResult, Question};

// ---------------------------------------------------------------------------
// Evaluation service
// ---------------------------------------------------------------------------

/// Something that turns a complete answer set into a verdict.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Short description used in logs (e.g. the endpoint URL).
    fn name(&self) -> &str;

    /// Evaluate a complete answer set. Any error is a total failure.
    async fn evaluate(&self, answers: &AnswerStore) -> anyhow::Result<EvaluationResult>;
}

// ---------------------------------------------------------------------------
// Question presentation
// ---------------------------------------------------------------------------

/// Renders one question and reports the confirmed answer.
///
/// Implementations must only return answers inside the question's domain;
/// see [`crate::input::InputDraft::confirm`].
pub trait QuestionPresenter {
    fn present(
        &mut self,
        question: &Question,
        position: usize,
        total: usize,
        current: Option<AnswerValue>,
    ) -> anyhow::Result<Answer>;
}

// ---------------------------------------------------------------------------
// Submission progress
// ---------------------------------------------------------------------------

/// Progress hooks around the single evaluation call.
pub trait SubmissionObserver: Send + Sync {
    fn on_submit_start(&self, submission: &Submission);
    fn on_submit_complete(&self, submission: &Submission, result: &EvaluationResult);
    fn on_submit_error(&self, submission: &Submission, error: &EvaluationUnavailable);
}

/// No-op submission observer.
pub struct NoopObserver;

impl SubmissionObserver for NoopObserver {
    fn on_submit_start(&self, _: &Submission) {}
    fn on_submit_complete(&self, _: &Submission, _: &EvaluationResult) {}
    fn on_submit_error(&self, _: &Submission, _: &EvaluationUnavailable) {}
}
