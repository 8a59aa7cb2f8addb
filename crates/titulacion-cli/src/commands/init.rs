//! The `titulacion init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("titulacion.toml").exists() {
        println!("titulacion.toml already exists, skipping.");
    } else {
        std::fs::write("titulacion.toml", SAMPLE_CONFIG)?;
        println!("Created titulacion.toml");
    }

    println!("\nNext steps:");
    println!("  1. Start the evaluation service: titulacion-server");
    println!("  2. Try a preset: titulacion example --name \"Fallo por Servicio Social\"");
    println!("  3. Run the wizard: titulacion diagnose");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# titulacion configuration

# Evaluation service endpoint. ${VAR} references are expanded.
endpoint = "http://127.0.0.1:5001/api/evaluate"

# Client-side request timeout in seconds (unset = wait for the service).
# timeout_secs = 30
"#;
