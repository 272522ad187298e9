//! campus CLI - runs the campus resource API
//!
//! Subcommands:
//! - `serve`: bootstrap the schema and serve the HTTP API
//! - `reset-db`: drop every table

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::Environment;

#[derive(Parser, Debug)]
#[command(
    name = "campus",
    author,
    version,
    about = "Generic CRUD API for universities, departments, people and study material"
)]
struct Cli {
    /// Deployment mode (development: debug logs; production: info as JSON)
    #[arg(long, env = "ENVIRONMENT", value_enum, default_value_t = Environment::Development, global = true)]
    environment: Environment,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Drop all tables (destroys every record)
    ResetDb(commands::reset_db::ResetDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_path = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        environment: cli.environment,
        otel: cli.otel,
    })
    .ok();

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded .env from {}", path.display());
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::ResetDb(args) => commands::run_reset_db(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
