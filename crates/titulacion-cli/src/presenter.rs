//! Terminal front end for the wizard: dialoguer prompts and a progress spinner.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use titulacion_core::controller::Submission;
use titulacion_core::error::EvaluationUnavailable;
use titulacion_core::input::{parse_percentage, BoolChoice, InputDraft};
use titulacion_core::model::{Answer, AnswerValue, EvaluationResult, Question};
use titulacion_core::traits::{QuestionPresenter, SubmissionObserver};

/// Notice shown when the evaluation service cannot be reached.
pub const CONNECTION_NOTICE: &str = "Error al conectar con el servidor.";

/// Asks each question on the terminal until the draft confirms.
#[derive(Default)]
pub struct DialoguerPresenter {
    theme: ColorfulTheme,
}

impl DialoguerPresenter {
    /// Yes/No selector. Esc leaves the control unset.
    fn choose(&self, question: &Question, draft: BoolChoice) -> Result<BoolChoice> {
        let labels: Vec<&str> = BoolChoice::OPTIONS.iter().map(|c| c.label()).collect();
        let mut select = Select::with_theme(&self.theme)
            .with_prompt(format!("  {}", question.text))
            .items(&labels);
        if let Some(i) = BoolChoice::OPTIONS.iter().position(|c| *c == draft) {
            select = select.default(i);
        }
        Ok(select
            .interact_opt()?
            .map_or(BoolChoice::Unset, |i| BoolChoice::OPTIONS[i]))
    }

    fn type_number(&self, question: &Question, draft: &str) -> Result<String> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(format!("  {} (0-100)", question.text))
            .with_initial_text(draft)
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                parse_percentage(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;
        Ok(raw)
    }
}

impl QuestionPresenter for DialoguerPresenter {
    fn present(
        &mut self,
        question: &Question,
        position: usize,
        total: usize,
        current: Option<AnswerValue>,
    ) -> Result<Answer> {
        println!();
        println!(
            "  {} {}",
            style(format!("Pregunta {position} de {total}")).dim(),
            style(question.key).dim()
        );

        let mut draft = InputDraft::for_question(question, current);
        loop {
            draft = match draft {
                InputDraft::Choice(choice) => InputDraft::Choice(self.choose(question, choice)?),
                InputDraft::Number(raw) => InputDraft::Number(self.type_number(question, &raw)?),
            };

            match draft.confirm(question) {
                Ok(answer) => return Ok(answer),
                Err(rejected) => println!("  {} {rejected}", style("✗").red()),
            }
        }
    }
}

/// Show [`CONNECTION_NOTICE`] and wait for Enter before going on.
pub fn acknowledge_failure(theme: &ColorfulTheme, failure: &EvaluationUnavailable) -> Result<()> {
    tracing::debug!(reason = %failure.reason, "showing connection notice");
    println!();
    println!("  {} {}", style("✗").red(), style(CONNECTION_NOTICE).red().bold());
    Input::<String>::with_theme(theme)
        .with_prompt("  Presiona Enter para continuar")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

/// Spinner shown while the single evaluation call is in flight.
#[derive(Default)]
pub struct SpinnerObserver {
    spinner: Mutex<Option<ProgressBar>>,
}

impl SpinnerObserver {
    fn clear(&self) {
        if let Ok(mut spinner) = self.spinner.lock() {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl SubmissionObserver for SpinnerObserver {
    fn on_submit_start(&self, _: &Submission) {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message("Analizando...");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_submit_complete(&self, _: &Submission, _: &EvaluationResult) {
        self.clear();
    }

    fn on_submit_error(&self, _: &Submission, _: &EvaluationUnavailable) {
        self.clear();
    }
}
