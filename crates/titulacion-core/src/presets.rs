//! Preset answer sets that bypass question-by-question collection.

use serde::Serialize;

use crate::model::AnswerStore;

/// A named, complete answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleCase {
    /// Display label.
    pub name: String,
    /// Answers for every catalog key.
    pub data: AnswerStore,
}

impl ExampleCase {
    fn new(name: &str, data: AnswerStore) -> Self {
        Self {
            name: name.to_string(),
            data,
        }
    }
}

fn all_requirements_met() -> AnswerStore {
    let mut data = AnswerStore::new();
    data.insert("credits_percentage", 100u8);
    data.insert("social_service_completed", true);
    data.insert("professional_practices_completed", true);
    data.insert("humanist_formation_completed", true);
    data.insert("language_requirement_met", true);
    data.insert("exit_exam_presented", true);
    data.insert("debt_tuition", false);
    data.insert("debt_library", false);
    data.insert("debt_lab", false);
    data.insert("title_fee_paid", true);
    data
}

/// The shipped example cases, one per end-to-end scenario.
pub fn example_cases() -> Vec<ExampleCase> {
    let success = all_requirements_met();

    let mut social_service = success.clone();
    social_service.insert("social_service_completed", false);

    let mut debts = success.clone();
    debts.insert("debt_library", true);

    let mut pending = success.clone();
    pending.insert("credits_percentage", 85u8);
    pending.insert("professional_practices_completed", false);
    pending.insert("language_requirement_met", false);
    pending.insert("title_fee_paid", false);

    vec![
        ExampleCase::new("Titulación Exitosa (Todo aprobado)", success),
        ExampleCase::new("Fallo por Servicio Social", social_service),
        ExampleCase::new("Fallo por Adeudos", debts),
        ExampleCase::new("Múltiples Requisitos Pendientes", pending),
    ]
}

/// Find an example case by name, ignoring case.
pub fn find_example(name: &str) -> Option<ExampleCase> {
    let wanted = name.trim().to_lowercase();
    example_cases()
        .into_iter()
        .find(|case| case.name.to_lowercase() == wanted)
}
