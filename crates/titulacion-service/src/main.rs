//! titulacion-server: serves the graduation-requirement rules over HTTP.

use std::net::SocketAddr;
use std::process;

use clap::Parser;

use titulacion_service::{serve, InferenceEngine};

#[derive(Parser)]
#[command(
    name = "titulacion-server",
    version,
    about = "Graduation-requirement evaluation service"
)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "TITULACION_BIND", default_value = "127.0.0.1:5001")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = serve(cli.bind, InferenceEngine::default()).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
