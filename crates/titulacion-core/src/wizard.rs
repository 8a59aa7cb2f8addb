//! The wizard as an explicit finite-state machine.
//!
//! [`Wizard::step`] is a pure transition function: it takes the current
//! wizard by reference and an event, and returns the next wizard together
//! with the side effect the caller must perform (if any). Nothing here does
//! I/O; the [`crate::controller::Controller`] performs the effects.

use crate::catalog::QUESTIONS;
use crate::error::WizardError;
use crate::model::{Answer, AnswerStore, EvaluationResult, Question};
use crate::presets::ExampleCase;

/// Where the wizard is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Idle; offers "begin" and "load example".
    Start,
    /// Presenting the question at `index`.
    Collecting { index: usize },
    /// The evaluation call is in flight.
    Submitting,
    /// Showing the verdict until the user retries.
    Done(EvaluationResult),
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::Start => "start",
            WizardState::Collecting { .. } => "collecting",
            WizardState::Submitting => "submitting",
            WizardState::Done(_) => "done",
        }
    }
}

/// Inputs to the state machine: user actions and evaluation outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Begin,
    LoadExample(ExampleCase),
    Answer(Answer),
    /// Re-send the answers preserved after a failed evaluation.
    Resubmit,
    EvaluationSucceeded(EvaluationResult),
    EvaluationFailed(String),
    Retry,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::Begin => "begin",
            WizardEvent::LoadExample(_) => "load_example",
            WizardEvent::Answer(_) => "answer",
            WizardEvent::Resubmit => "resubmit",
            WizardEvent::EvaluationSucceeded(_) => "evaluation_succeeded",
            WizardEvent::EvaluationFailed(_) => "evaluation_failed",
            WizardEvent::Retry => "retry",
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send this complete answer set to the evaluation service.
    Submit(AnswerStore),
    /// Tell the user the evaluation failed.
    NotifyFailure(String),
}

/// Result of a single transition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub wizard: Wizard,
    pub effect: Option<Effect>,
}

/// Wizard state plus the answers accumulated so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    catalog: &'static [Question],
    state: WizardState,
    answers: AnswerStore,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// A wizard over the reference catalog, in `Start`.
    pub fn new() -> Self {
        Self::with_catalog(&QUESTIONS)
    }

    pub fn with_catalog(catalog: &'static [Question]) -> Self {
        Self {
            catalog,
            state: WizardState::Start,
            answers: AnswerStore::new(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn catalog(&self) -> &'static [Question] {
        self.catalog
    }

    /// The question being presented, while collecting.
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            WizardState::Collecting { index } => self.catalog.get(index),
            _ => None,
        }
    }

    /// `(1-based position, total)` while collecting.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            WizardState::Collecting { index } => Some((index + 1, self.catalog.len())),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == WizardState::Submitting
    }

    /// True when a failed submission left a complete answer set behind.
    pub fn can_resubmit(&self) -> bool {
        self.state == WizardState::Start
            && !self.answers.is_empty()
            && self.answers.is_complete(self.catalog)
    }

    /// Compute the transition for `event` without modifying `self`.
    pub fn step(&self, event: WizardEvent) -> Result<Transition, WizardError> {
        let event_name = event.name();

        match (&self.state, event) {
            (WizardState::Start, WizardEvent::Begin) => {
                if self.catalog.is_empty() {
                    return Ok(self.submitting(AnswerStore::new()));
                }
                Ok(self.moved(WizardState::Collecting { index: 0 }, AnswerStore::new()))
            }

            (WizardState::Start, WizardEvent::LoadExample(case)) => {
                self.check_complete(&case.data)?;
                Ok(self.submitting(case.data))
            }

            (WizardState::Start, WizardEvent::Resubmit) if !self.answers.is_empty() => {
                self.check_complete(&self.answers)?;
                Ok(self.submitting(self.answers.clone()))
            }

            (WizardState::Collecting { index }, WizardEvent::Answer(answer)) => {
                let index = *index;
                let question = &self.catalog[index];
                if answer.key != question.key {
                    return Err(WizardError::UnexpectedQuestion {
                        expected: question.key,
                        got: answer.key,
                    });
                }
                question
                    .check(&answer.value)
                    .map_err(|source| WizardError::Rejected {
                        key: answer.key.clone(),
                        source,
                    })?;

                let mut answers = self.answers.clone();
                answers.insert(answer.key, answer.value);

                if index + 1 < self.catalog.len() {
                    Ok(self.moved(WizardState::Collecting { index: index + 1 }, answers))
                } else {
                    Ok(self.submitting(answers))
                }
            }

            (WizardState::Submitting, WizardEvent::EvaluationSucceeded(result)) => {
                Ok(self.moved(WizardState::Done(result), self.answers.clone()))
            }

            (WizardState::Submitting, WizardEvent::EvaluationFailed(reason)) => Ok(Transition {
                wizard: Wizard {
                    catalog: self.catalog,
                    state: WizardState::Start,
                    answers: self.answers.clone(),
                },
                effect: Some(Effect::NotifyFailure(reason)),
            }),

            (WizardState::Done(_), WizardEvent::Retry) => {
                Ok(self.moved(WizardState::Start, AnswerStore::new()))
            }

            (state, _) => Err(WizardError::InvalidEvent {
                state: state.name(),
                event: event_name,
            }),
        }
    }

    /// Apply `event` in place and return the requested effect.
    pub fn apply(&mut self, event: WizardEvent) -> Result<Option<Effect>, WizardError> {
        let transition = self.step(event)?;
        *self = transition.wizard;
        Ok(transition.effect)
    }

    fn moved(&self, state: WizardState, answers: AnswerStore) -> Transition {
        Transition {
            wizard: Wizard {
                catalog: self.catalog,
                state,
                answers,
            },
            effect: None,
        }
    }

    fn submitting(&self, answers: AnswerStore) -> Transition {
        Transition {
            wizard: Wizard {
                catalog: self.catalog,
                state: WizardState::Submitting,
                answers: answers.clone(),
            },
            effect: Some(Effect::Submit(answers)),
        }
    }

    fn check_complete(&self, answers: &AnswerStore) -> Result<(), WizardError> {
        let missing = answers.missing_keys(self.catalog);
        if !missing.is_empty() {
            return Err(WizardError::Incomplete { missing });
        }
        for question in self.catalog {
            if let Some(value) = answers.get(question.key) {
                question
                    .check(&value)
                    .map_err(|source| WizardError::Rejected {
                        key: question.key.to_string(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationRejected;
    use crate::model::{AnswerValue, QuestionType};
    use crate::presets::find_example;

    fn answer_all(mut wizard: Wizard) -> (Wizard, Vec<Effect>) {
        let mut effects = Vec::new();
        while let Some(question) = wizard.current_question() {
            let value = match question.kind {
                QuestionType::Integer => AnswerValue::Integer(100),
                QuestionType::Boolean => AnswerValue::Bool(!question.key.starts_with("debt")),
            };
            if let Some(effect) = wizard
                .apply(WizardEvent::Answer(Answer::new(question.key, value)))
                .unwrap()
            {
                effects.push(effect);
            }
        }
        (wizard, effects)
    }

    #[test]
    fn begin_starts_at_first_question_with_empty_store() {
        let wizard = Wizard::new();
        let t = wizard.step(WizardEvent::Begin).unwrap();
        assert_eq!(t.wizard.state(), &WizardState::Collecting { index: 0 });
        assert!(t.wizard.answers().is_empty());
        assert!(t.effect.is_none());
        assert_eq!(t.wizard.progress(), Some((1, 10)));
        // step is pure
        assert_eq!(wizard.state(), &WizardState::Start);
    }

    #[test]
    fn answering_in_order_submits_exactly_once_with_all_keys() {
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::Begin).unwrap();
        let (wizard, effects) = answer_all(wizard);

        assert_eq!(wizard.state(), &WizardState::Submitting);
        assert!(wizard.is_loading());
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Submit(answers) => {
                assert!(answers.is_complete(&QUESTIONS));
                assert_eq!(answers.len(), QUESTIONS.len());
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn any_in_domain_answers_submit_once_with_every_key() {
        for credits in [0u8, 50, 100] {
            for flag in [true, false] {
                let mut wizard = Wizard::new();
                wizard.apply(WizardEvent::Begin).unwrap();
                let mut effects = Vec::new();
                while let Some(question) = wizard.current_question() {
                    let value = match question.kind {
                        QuestionType::Integer => AnswerValue::Integer(credits),
                        QuestionType::Boolean => AnswerValue::Bool(flag),
                    };
                    effects.extend(
                        wizard
                            .apply(WizardEvent::Answer(Answer::new(question.key, value)))
                            .unwrap(),
                    );
                }

                assert_eq!(wizard.state(), &WizardState::Submitting, "credits={credits} flag={flag}");
                assert_eq!(effects.len(), 1, "credits={credits} flag={flag}");
                let Effect::Submit(answers) = &effects[0] else {
                    panic!("unexpected effect {:?}", effects[0]);
                };
                assert_eq!(answers.len(), QUESTIONS.len());
                assert!(answers.missing_keys(&QUESTIONS).is_empty());
                assert_eq!(answers.get("credits_percentage"), Some(AnswerValue::Integer(credits)));
                assert_eq!(answers.get("debt_lab"), Some(AnswerValue::Bool(flag)));
            }
        }
    }

    #[test]
    fn out_of_range_integer_is_not_stored() {
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::Begin).unwrap();
        let err = wizard
            .apply(WizardEvent::Answer(Answer::new(
                "credits_percentage",
                AnswerValue::Integer(150),
            )))
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::Rejected {
                key: "credits_percentage".into(),
                source: ValidationRejected::OutOfRange { value: 150 },
            }
        );
        assert_eq!(wizard.state(), &WizardState::Collecting { index: 0 });
        assert!(wizard.answers().is_empty());
    }

    #[test]
    fn answer_for_another_question_is_rejected() {
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::Begin).unwrap();
        let err = wizard
            .apply(WizardEvent::Answer(Answer::new("debt_lab", false)))
            .unwrap_err();
        assert!(matches!(err, WizardError::UnexpectedQuestion { expected: "credits_percentage", .. }));
    }

    #[test]
    fn boolean_question_rejects_integer() {
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::Begin).unwrap();
        wizard
            .apply(WizardEvent::Answer(Answer::new("credits_percentage", 90u8)))
            .unwrap();
        let err = wizard
            .apply(WizardEvent::Answer(Answer::new("social_service_completed", 1u8)))
            .unwrap_err();
        assert!(matches!(err, WizardError::Rejected { .. }));
        assert_eq!(wizard.state(), &WizardState::Collecting { index: 1 });
    }

    #[test]
    fn load_example_submits_its_data_without_walking_catalog() {
        let case = find_example("Titulación Exitosa (Todo aprobado)").unwrap();
        let t = Wizard::new()
            .step(WizardEvent::LoadExample(case.clone()))
            .unwrap();
        assert_eq!(t.wizard.state(), &WizardState::Submitting);
        assert_eq!(t.effect, Some(Effect::Submit(case.data.clone())));
        assert_eq!(t.wizard.answers(), &case.data);
    }

    #[test]
    fn incomplete_example_is_refused() {
        let mut case = find_example("Fallo por Adeudos").unwrap();
        case.data = case
            .data
            .iter()
            .filter(|(k, _)| *k != "debt_lab")
            .collect();
        let err = Wizard::new()
            .step(WizardEvent::LoadExample(case))
            .unwrap_err();
        assert_eq!(err, WizardError::Incomplete { missing: vec!["debt_lab"] });
    }

    #[test]
    fn example_cannot_interrupt_collection() {
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::Begin).unwrap();
        let case = find_example("Fallo por Adeudos").unwrap();
        let err = wizard.apply(WizardEvent::LoadExample(case)).unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidEvent {
                state: "collecting",
                event: "load_example"
            }
        );
    }

    #[test]
    fn submitting_accepts_only_outcomes() {
        let case = find_example("Fallo por Adeudos").unwrap();
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::LoadExample(case.clone())).unwrap();

        for event in [
            WizardEvent::Begin,
            WizardEvent::LoadExample(case),
            WizardEvent::Answer(Answer::new("credits_percentage", 100u8)),
            WizardEvent::Resubmit,
            WizardEvent::Retry,
        ] {
            assert!(matches!(
                wizard.step(event),
                Err(WizardError::InvalidEvent { state: "submitting", .. })
            ));
        }
    }

    #[test]
    fn failure_returns_to_start_preserving_answers() {
        let case = find_example("Fallo por Servicio Social").unwrap();
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::LoadExample(case.clone())).unwrap();
        let effect = wizard
            .apply(WizardEvent::EvaluationFailed("connection refused".into()))
            .unwrap();

        assert_eq!(effect, Some(Effect::NotifyFailure("connection refused".into())));
        assert_eq!(wizard.state(), &WizardState::Start);
        assert!(!wizard.is_loading());
        assert_eq!(wizard.answers(), &case.data);
        assert!(wizard.can_resubmit());
    }

    #[test]
    fn resubmit_resends_preserved_answers() {
        let case = find_example("Fallo por Servicio Social").unwrap();
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::LoadExample(case.clone())).unwrap();
        wizard
            .apply(WizardEvent::EvaluationFailed("timeout".into()))
            .unwrap();
        let effect = wizard.apply(WizardEvent::Resubmit).unwrap();
        assert_eq!(effect, Some(Effect::Submit(case.data)));
    }

    #[test]
    fn resubmit_needs_preserved_answers() {
        let err = Wizard::new().step(WizardEvent::Resubmit).unwrap_err();
        assert!(matches!(err, WizardError::InvalidEvent { state: "start", event: "resubmit" }));
    }

    #[test]
    fn success_then_retry_clears_everything() {
        let mut wizard = Wizard::new();
        wizard.apply(WizardEvent::Begin).unwrap();
        let (mut wizard, _) = answer_all(wizard);
        wizard
            .apply(WizardEvent::EvaluationSucceeded(EvaluationResult::passed()))
            .unwrap();
        assert_eq!(
            wizard.state(),
            &WizardState::Done(EvaluationResult::passed())
        );

        wizard.apply(WizardEvent::Retry).unwrap();
        assert_eq!(wizard.state(), &WizardState::Start);
        assert!(wizard.answers().is_empty());

        wizard.apply(WizardEvent::Begin).unwrap();
        wizard
            .apply(WizardEvent::Answer(Answer::new("credits_percentage", 10u8)))
            .unwrap();
        assert_eq!(wizard.answers().len(), 1);
        assert_eq!(
            wizard.answers().get("credits_percentage"),
            Some(AnswerValue::Integer(10))
        );
        assert!(!wizard.answers().contains_key("title_fee_paid"));
    }

    #[test]
    fn retry_only_from_done() {
        assert!(matches!(
            Wizard::new().step(WizardEvent::Retry),
            Err(WizardError::InvalidEvent { state: "start", event: "retry" })
        ));
    }

    #[test]
    fn empty_catalog_submits_immediately() {
        static NONE: [Question; 0] = [];
        let t = Wizard::with_catalog(&NONE).step(WizardEvent::Begin).unwrap();
        assert_eq!(t.wizard.state(), &WizardState::Submitting);
        assert_eq!(t.effect, Some(Effect::Submit(AnswerStore::new())));
    }
}
