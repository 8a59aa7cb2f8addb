use console::style;

use titulacion_core::model::EvaluationResult;
use titulacion_core::verdict::Verdict;

pub fn banner() {
    println!();
    println!("  {}", style("Experto en Titulación").cyan().bold());
    println!(
        "  {}",
        style("Verifica si cumples con los requisitos para titularte").dim()
    );
    println!();
}

/// Print the result screen for `result`.
pub fn verdict(result: &EvaluationResult) {
    let verdict = Verdict::from(result);

    println!();
    if verdict.passed {
        println!("  {} {}", style("✓").green(), style(verdict.title).green().bold());
    } else {
        println!("  {} {}", style("✗").red(), style(verdict.title).red().bold());
    }
    println!("  {}", verdict.message);
    for reason in verdict.reasons {
        println!("    {} {reason}", style("•").red());
    }
    println!();
}
