//! titulacion CLI: the user-facing graduation-requirements wizard.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod presenter;
mod render;

#[derive(Parser)]
#[command(
    name = "titulacion",
    version,
    about = "Experto en Titulación: verifica tus requisitos para titularte"
)]
struct Cli {
    /// Evaluation endpoint (overrides config and TITULACION_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file path
    #[arg(long, global = true, env = "TITULACION_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive diagnosis wizard
    Diagnose,

    /// Submit one of the preset example cases
    Example {
        /// Example case name (see `titulacion examples`)
        #[arg(long)]
        name: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the questionnaire
    Questions,

    /// List the preset example cases
    Examples,

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diagnose => {
            match commands::build_evaluator(cli.endpoint, cli.config.as_deref()) {
                Ok(evaluator) => commands::diagnose::execute(evaluator).await,
                Err(e) => Err(e),
            }
        }
        Commands::Example { name, format } => {
            match commands::build_evaluator(cli.endpoint, cli.config.as_deref()) {
                Ok(evaluator) => commands::example::execute(evaluator, &name, format).await,
                Err(e) => Err(e),
            }
        }
        Commands::Questions => commands::list::questions(),
        Commands::Examples => commands::list::examples(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
