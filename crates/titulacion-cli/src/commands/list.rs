//! The `titulacion questions` and `titulacion examples` commands.

use anyhow::Result;
use comfy_table::{Cell, Table};

use titulacion_core::catalog::QUESTIONS;
use titulacion_core::presets::example_cases;

pub fn questions() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Key", "Type", "Question"]);

    for (i, question) in QUESTIONS.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(question.key),
            Cell::new(question.kind),
            Cell::new(question.text),
        ]);
    }

    println!("{table}");
    println!("{} questions", QUESTIONS.len());
    Ok(())
}

pub fn examples() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Answers"]);

    for (i, case) in example_cases().iter().enumerate() {
        let answers = QUESTIONS
            .iter()
            .filter_map(|q| case.data.get(q.key).map(|v| format!("{} = {v}", q.key)))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![Cell::new(i + 1), Cell::new(&case.name), Cell::new(answers)]);
    }

    println!("{table}");
    Ok(())
}
