use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use promocast::app;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web pages and the JSON API
    Web,
    /// Import diners from a spreadsheet export (CSV)
    SeedDiners {
        /// Path to the CSV file
        file: PathBuf,
    },
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Web => app::web::main().await,
        Commands::SeedDiners { file } => app::seed::main(&file),
    }
}
