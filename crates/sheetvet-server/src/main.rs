//! Sheetvet server - validate and import spreadsheet uploads.

mod db;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sheetvet::SheetVet;
use tracing_subscriber::EnvFilter;

use server::state::AppState;

#[derive(Parser)]
#[command(name = "sheetvet-server", about = "Spreadsheet validation and import service")]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Path to the SQLite database file.
    #[arg(long, default_value = "imported_data.db")]
    db_path: PathBuf,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Registry is built once and read-only afterwards; requests share it
    // without locking.
    let vet = Arc::new(SheetVet::new());

    let pool = db::init_pool(&cli.db_path).await?;
    db::init_tables(&pool, vet.registry()).await?;

    let state = AppState::new(vet, pool);
    server::app::run_server(state, cli.port).await
}
