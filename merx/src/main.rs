// merx/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup Logging (Tracing)
    // RUST_LOG=debug merx etl ... to see the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            project_dir,
            customers,
            products,
            orders,
            seed,
        } => commands::generate::execute(project_dir, customers, products, orders, seed),

        Commands::Etl { project_dir } => commands::etl::execute(project_dir).await,

        Commands::Report { project_dir } => commands::report::execute(project_dir).await,

        Commands::Charts { project_dir } => commands::charts::execute(project_dir).await,

        Commands::Query { query, db_path } => commands::query::execute(db_path, query).await,

        Commands::Inspect {
            db_path,
            table,
            limit,
        } => commands::inspect::execute(db_path, table, limit).await,

        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    }
}
