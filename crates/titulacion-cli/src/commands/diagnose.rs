//! The `titulacion diagnose` command: the interactive wizard.

use anyhow::{bail, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

use titulacion_client::HttpEvaluator;
use titulacion_core::controller::Controller;
use titulacion_core::error::EvaluationUnavailable;
use titulacion_core::presets::{example_cases, ExampleCase};
use titulacion_core::verdict::RETRY_LABEL;
use titulacion_core::traits::Evaluator;
use titulacion_core::wizard::{WizardEvent, WizardState};

use crate::presenter::{acknowledge_failure, DialoguerPresenter, SpinnerObserver};
use crate::render;

enum StartChoice {
    Begin,
    Example(usize),
    Resubmit,
    Quit,
}

fn start_menu(
    theme: &ColorfulTheme,
    examples: &[ExampleCase],
    can_resubmit: bool,
) -> Result<StartChoice> {
    let mut choices = vec![StartChoice::Begin];
    let mut labels = vec!["Comenzar diagnóstico".to_string()];
    for (i, case) in examples.iter().enumerate() {
        choices.push(StartChoice::Example(i));
        labels.push(format!("Ejemplo: {}", case.name));
    }
    if can_resubmit {
        choices.push(StartChoice::Resubmit);
        labels.push("Reenviar respuestas".to_string());
    }
    choices.push(StartChoice::Quit);
    labels.push("Salir".to_string());

    let selected = Select::with_theme(theme)
        .with_prompt("  ¿Qué deseas hacer?")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(match selected {
        Some(i) => choices.swap_remove(i),
        None => StartChoice::Quit,
    })
}

fn play_again(theme: &ColorfulTheme) -> Result<bool> {
    let selected = Select::with_theme(theme)
        .items(&[RETRY_LABEL, "Salir"])
        .default(0)
        .interact_opt()?;
    Ok(selected == Some(0))
}

/// A failed submission lands back on `start` with its failure recorded;
/// that is the moment the notice must be acknowledged.
fn pending_failure<E: Evaluator>(controller: &Controller<E>) -> Option<&EvaluationUnavailable> {
    match controller.state() {
        WizardState::Start => controller.last_failure(),
        _ => None,
    }
}

pub async fn execute(evaluator: HttpEvaluator) -> Result<()> {
    render::banner();

    let theme = ColorfulTheme::default();
    let examples = example_cases();
    let mut presenter = DialoguerPresenter::default();
    let mut controller = Controller::new(evaluator).with_observer(SpinnerObserver::default());

    loop {
        let event = match controller.state() {
            WizardState::Start => {
                match start_menu(&theme, &examples, controller.wizard().can_resubmit())? {
                    StartChoice::Begin => WizardEvent::Begin,
                    StartChoice::Example(i) => WizardEvent::LoadExample(examples[i].clone()),
                    StartChoice::Resubmit => WizardEvent::Resubmit,
                    StartChoice::Quit => return Ok(()),
                }
            }
            WizardState::Collecting { .. } => {
                controller.collect(&mut presenter).await?;
                if let Some(failure) = pending_failure(&controller) {
                    acknowledge_failure(&theme, failure)?;
                }
                continue;
            }
            WizardState::Submitting => bail!("an evaluation is already in flight"),
            WizardState::Done(result) => {
                render::verdict(result);
                if !play_again(&theme)? {
                    return Ok(());
                }
                WizardEvent::Retry
            }
        };
        controller.dispatch(event).await?;
        if let Some(failure) = pending_failure(&controller) {
            acknowledge_failure(&theme, failure)?;
        }
    }
}
