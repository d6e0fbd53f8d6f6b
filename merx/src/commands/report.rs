// merx/src/commands/report.rs
//
// USE CASE: Run the five fixed SQL analyses and print the tables.

use std::path::PathBuf;

use anyhow::Context;
use merx_core::application::{print_report, run_report};
use merx_core::infrastructure::adapters::DuckDbStore;
use merx_core::infrastructure::config::load_pipeline_config;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_pipeline_config(&project_dir)?;
    let db_path = project_dir.join(&config.db_path);
    if !db_path.exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'merx etl'?",
            db_path.display()
        );
    }

    let store = DuckDbStore::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to open DuckDB at {:?}", db_path))?;

    let results = run_report(&store).await;
    print_report(&results);

    // Partial success is intended here, but "all five failed" means the
    // store is unusable: surface that as a failure for CI.
    if results.iter().all(|(_, r)| r.is_none()) {
        eprintln!("❌ Every analysis failed.");
        std::process::exit(1);
    }

    Ok(())
}
