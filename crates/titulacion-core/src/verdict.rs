//! Presentation model for an evaluation result.

use std::fmt;

use crate::model::EvaluationResult;

/// Label of the action that returns the wizard to `start`.
pub const RETRY_LABEL: &str = "Nuevo Diagnóstico";

/// What the result screen shows. Reasons are kept verbatim and in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict<'a> {
    pub passed: bool,
    pub title: &'static str,
    pub message: &'static str,
    /// Empty when passed.
    pub reasons: &'a [String],
}

impl<'a> From<&'a EvaluationResult> for Verdict<'a> {
    fn from(result: &'a EvaluationResult) -> Self {
        if result.passed {
            Verdict {
                passed: true,
                title: "¡Felicidades!",
                message: "Cumples con todos los requisitos para titularte.",
                reasons: &[],
            }
        } else {
            Verdict {
                passed: false,
                title: "Requisitos Pendientes",
                message: "Aún no puedes titularte por las siguientes razones:",
                reasons: &result.reasons,
            }
        }
    }
}

impl fmt::Display for Verdict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.message)?;
        for reason in self.reasons {
            writeln!(f, "  - {reason}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_verdict_hides_reasons() {
        let result = EvaluationResult {
            passed: true,
            reasons: vec!["ignored".into()],
        };
        let verdict = Verdict::from(&result);
        assert_eq!(verdict.title, "¡Felicidades!");
        assert!(verdict.reasons.is_empty());
        assert_eq!(
            verdict.to_string(),
            "¡Felicidades!\nCumples con todos los requisitos para titularte.\n"
        );
    }

    #[test]
    fn failed_verdict_keeps_order_and_duplicates() {
        let result = EvaluationResult::failed(vec![
            "B".into(),
            "A".into(),
            "B".into(),
        ]);
        let verdict = Verdict::from(&result);
        assert_eq!(verdict.reasons, result.reasons.as_slice());
        assert_eq!(verdict.reasons[1], "A");
        let text = verdict.to_string();
        assert!(text.starts_with("Requisitos Pendientes\n"));
        assert!(text.ends_with("  - B\n  - A\n  - B\n"));
    }
}
