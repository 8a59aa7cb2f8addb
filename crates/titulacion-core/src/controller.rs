//! Wizard controller: runs the state machine and performs its effects.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EvaluationUnavailable, WizardError};
use crate::model::AnswerStore;
use crate::traits::{Evaluator, NoopObserver, QuestionPresenter, SubmissionObserver};
use crate::wizard::{Effect, Wizard, WizardEvent, WizardState};

/// One dispatched evaluation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: Uuid,
    pub dispatched_at: DateTime<Utc>,
    pub answers: AnswerStore,
}

impl Submission {
    fn new(answers: AnswerStore) -> Self {
        Self {
            id: Uuid::new_v4(),
            dispatched_at: Utc::now(),
            answers,
        }
    }
}

/// Drives a [`Wizard`] against an [`Evaluator`].
///
/// `dispatch` takes `&mut self` and awaits the evaluation before returning,
/// so a controller never has more than one call in flight.
pub struct Controller<E> {
    wizard: Wizard,
    evaluator: E,
    observer: Box<dyn SubmissionObserver>,
    last_submission: Option<Submission>,
    last_failure: Option<EvaluationUnavailable>,
}

impl<E: Evaluator> Controller<E> {
    pub fn new(evaluator: E) -> Self {
        Self::with_wizard(Wizard::new(), evaluator)
    }

    pub fn with_wizard(wizard: Wizard, evaluator: E) -> Self {
        Self {
            wizard,
            evaluator,
            observer: Box::new(NoopObserver),
            last_submission: None,
            last_failure: None,
        }
    }

    pub fn with_observer(mut self, observer: impl SubmissionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn state(&self) -> &WizardState {
        self.wizard.state()
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// The failure of the most recent submission, if it failed.
    pub fn last_failure(&self) -> Option<&EvaluationUnavailable> {
        self.last_failure.as_ref()
    }

    /// Apply a user event. If it starts a submission, the evaluation runs to
    /// completion before this returns.
    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<&WizardState, WizardError> {
        let from = self.wizard.state().name();
        let event_name = event.name();
        let effect = self.wizard.apply(event)?;
        debug!(from, event = event_name, to = self.wizard.state().name(), "wizard transition");

        match effect {
            Some(Effect::Submit(answers)) => self.submit(answers).await?,
            Some(Effect::NotifyFailure(reason)) => {
                warn!(%reason, "evaluation failure reported outside a submission");
            }
            None => {}
        }

        Ok(self.wizard.state())
    }

    /// Ask `presenter` for every remaining question, in catalog order.
    ///
    /// The last confirmed answer triggers the submission.
    pub async fn collect<P>(&mut self, presenter: &mut P) -> anyhow::Result<()>
    where
        P: QuestionPresenter + ?Sized,
    {
        while let Some(question) = self.wizard.current_question() {
            let Some((position, total)) = self.wizard.progress() else {
                break;
            };
            let current = self.wizard.answers().get(question.key);
            let answer = presenter.present(question, position, total, current)?;
            self.dispatch(WizardEvent::Answer(answer)).await?;
        }
        Ok(())
    }

    async fn submit(&mut self, answers: AnswerStore) -> Result<(), WizardError> {
        let submission = Submission::new(answers);
        self.last_failure = None;
        info!(
            submission = %submission.id,
            answers = submission.answers.len(),
            evaluator = self.evaluator.name(),
            "submitting answers for evaluation"
        );
        self.observer.on_submit_start(&submission);

        let follow_up = match self.evaluator.evaluate(&submission.answers).await {
            Ok(result) => {
                info!(submission = %submission.id, passed = result.passed, reasons = result.reasons.len(), "evaluation complete");
                self.observer.on_submit_complete(&submission, &result);
                WizardEvent::EvaluationSucceeded(result)
            }
            Err(e) => {
                warn!(submission = %submission.id, "evaluation failed: {e:#}");
                WizardEvent::EvaluationFailed(format!("{e:#}"))
            }
        };

        if let Some(Effect::NotifyFailure(reason)) = self.wizard.apply(follow_up)? {
            let failure = EvaluationUnavailable { reason };
            self.observer.on_submit_error(&submission, &failure);
            self.last_failure = Some(failure);
        }
        self.last_submission = Some(submission);
        Ok(())
    }
}
