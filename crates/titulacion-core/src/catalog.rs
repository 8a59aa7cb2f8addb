//! The fixed, ordered questionnaire.

use crate::model::{Question, QuestionType};

/// Reference catalog in presentation order.
pub static QUESTIONS: [Question; 10] = [
    Question {
        key: "credits_percentage",
        text: "¿Qué porcentaje de créditos has cubierto?",
        kind: QuestionType::Integer,
    },
    Question {
        key: "social_service_completed",
        text: "¿Has liberado tu Servicio Social?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "professional_practices_completed",
        text: "¿Has liberado tus Prácticas Profesionales?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "humanist_formation_completed",
        text: "¿Cubriste los créditos de Formación Humanista?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "language_requirement_met",
        text: "¿Acreditaste el Segundo Idioma?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "exit_exam_presented",
        text: "¿Presentaste el Examen de Egreso (EGEL/EXANI)?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "debt_tuition",
        text: "¿Tienes adeudos de colegiatura?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "debt_library",
        text: "¿Tienes adeudos de biblioteca?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "debt_lab",
        text: "¿Tienes adeudos de laboratorio?",
        kind: QuestionType::Boolean,
    },
    Question {
        key: "title_fee_paid",
        text: "¿Ya pagaste el derecho de titulación?",
        kind: QuestionType::Boolean,
    },
];
