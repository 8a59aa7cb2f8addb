//! Knowledge base: the graduation requirements as executable rules.

use serde_json::{Map, Value};
use thiserror::Error;

/// Facts submitted for evaluation, keyed by question key.
pub type Facts = Map<String, Value>;

/// A fact is present but has a type the rule cannot compare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fact '{key}' has unusable value {value}")]
pub struct FactError {
    pub key: &'static str,
    pub value: String,
}

type Check = fn(&Facts) -> Result<bool, FactError>;

/// A single graduation requirement.
pub struct Rule {
    /// Identifier used in logs.
    pub name: &'static str,
    /// What the rule verifies.
    pub description: &'static str,
    /// Shown to the student when the rule is not met.
    pub error_message: &'static str,
    check: Check,
}

impl Rule {
    pub fn new(
        name: &'static str,
        description: &'static str,
        error_message: &'static str,
        check: Check,
    ) -> Self {
        Self {
            name,
            description,
            error_message,
            check,
        }
    }

    /// Whether `facts` satisfy this rule.
    pub fn is_satisfied(&self, facts: &Facts) -> Result<bool, FactError> {
        (self.check)(facts)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Numeric fact; missing counts as 0 and booleans as 0/1.
fn number(facts: &Facts, key: &'static str) -> Result<f64, FactError> {
    match facts.get(key) {
        None => Ok(0.0),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| FactError {
            key,
            value: n.to_string(),
        }),
        Some(other) => Err(FactError {
            key,
            value: other.to_string(),
        }),
    }
}

/// True only for a literal JSON `true`.
fn is_true(facts: &Facts, key: &str) -> bool {
    matches!(facts.get(key), Some(Value::Bool(true)))
}

/// Loose truthiness, so a debt reported as `1` or `"sí"` still counts.
fn truthy(facts: &Facts, key: &str) -> bool {
    match facts.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// The undergraduate graduation requirements, in evaluation order.
pub fn knowledge_base() -> Vec<Rule> {
    vec![
        Rule::new(
            "Créditos Académicos",
            "Verifica que el alumno haya aprobado el 100% de las materias.",
            "No has cubierto el 100% de los créditos de tu plan de estudios.",
            |facts| Ok(number(facts, "credits_percentage")? >= 100.0),
        ),
        Rule::new(
            "Servicio Social",
            "Verifica la liberación del Servicio Social (500 horas, min 6 meses).",
            "Debes concluir y liberar tu Servicio Social (500 horas).",
            |facts| Ok(is_true(facts, "social_service_completed")),
        ),
        Rule::new(
            "Prácticas Profesionales",
            "Verifica la liberación de Prácticas Profesionales (min 240 horas).",
            "Debes concluir y liberar tus Prácticas Profesionales (mínimo 240 horas).",
            |facts| Ok(is_true(facts, "professional_practices_completed")),
        ),
        Rule::new(
            "Formación Humanista",
            "Verifica la cobertura de créditos de Formación Humanista.",
            "No has liberado los créditos de Formación Humanista.",
            |facts| Ok(is_true(facts, "humanist_formation_completed")),
        ),
        Rule::new(
            "Segundo Idioma",
            "Verifica la acreditación del idioma extranjero según el plan de estudios.",
            "No has acreditado el requisito de Segundo Idioma (Inglés u otro).",
            |facts| Ok(is_true(facts, "language_requirement_met")),
        ),
        Rule::new(
            "Examen de Egreso (EGEL/EXANI)",
            "Verifica la presentación del examen de egreso (requisito obligatorio).",
            "Es obligatorio presentar el Examen General de Egreso (EGEL/EXANI), aunque el resultado no Condicione el título.",
            |facts| Ok(is_true(facts, "exit_exam_presented")),
        ),
        Rule::new(
            "No Adeudos",
            "Verifica que no existan deudas en las 3 áreas críticas: Colegiatura, Biblioteca, Lab.",
            "Tienes adeudos pendientes (Colegiatura, Biblioteca o Laboratorio).",
            |facts| {
                Ok(!(truthy(facts, "debt_tuition")
                    || truthy(facts, "debt_library")
                    || truthy(facts, "debt_lab")))
            },
        ),
        Rule::new(
            "Pago de Título",
            "Verifica el pago administrativo de derechos de titulación.",
            "Debes cubrir el pago de derechos de Expedición de Título (~$2,300 - $2,500).",
            |facts| Ok(is_true(facts, "title_fee_paid")),
        ),
    ]
}
