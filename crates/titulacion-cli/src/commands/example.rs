//! The `titulacion example` command: submit a preset answer set.

use anyhow::{anyhow, bail, Result};
use serde_json::json;

use titulacion_client::HttpEvaluator;
use titulacion_core::controller::Controller;
use titulacion_core::presets::{example_cases, find_example};
use titulacion_core::wizard::{WizardEvent, WizardState};

use crate::presenter::SpinnerObserver;
use crate::{render, OutputFormat};

pub async fn execute(evaluator: HttpEvaluator, name: &str, format: OutputFormat) -> Result<()> {
    let Some(case) = find_example(name) else {
        let known: Vec<String> = example_cases().into_iter().map(|c| c.name).collect();
        bail!("unknown example case '{name}' (available: {})", known.join(", "));
    };

    let endpoint = evaluator.endpoint().to_string();
    let mut controller = Controller::new(evaluator).with_observer(SpinnerObserver::default());
    let case_name = case.name.clone();
    controller.dispatch(WizardEvent::LoadExample(case)).await?;

    let WizardState::Done(result) = controller.state() else {
        let reason = controller
            .last_failure()
            .map(|f| f.reason.clone())
            .unwrap_or_else(|| format!("wizard stopped in state '{}'", controller.state().name()));
        return Err(anyhow!("evaluation service unavailable at {endpoint}: {reason}"));
    };

    match format {
        OutputFormat::Text => {
            println!("  {case_name}");
            render::verdict(result);
        }
        OutputFormat::Json => {
            let submission = controller.last_submission();
            let output = json!({
                "example": case_name,
                "submission_id": submission.map(|s| s.id.to_string()),
                "evaluated_at": submission.map(|s| s.dispatched_at.to_rfc3339()),
                "passed": result.passed,
                "reasons": result.reasons,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
