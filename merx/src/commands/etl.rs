// merx/src/commands/etl.rs
//
// USE CASE: Run the ETL pipeline.

use std::path::PathBuf;

use anyhow::Context;
use merx_core::application::run_etl;
use merx_core::infrastructure::adapters::DuckDbStore;
use merx_core::infrastructure::config::load_pipeline_config;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_pipeline_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {}", config.name);

    // B. Instantiate the DB Adapter (DuckDB)
    println!("   Engine: DuckDB 🦆");
    let db_path = project_dir.join(&config.db_path);
    let store = DuckDbStore::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to initialize DuckDB at {:?}", db_path))?;

    // C. Run the Pipeline (Application Layer)
    match run_etl(&store, &config, &project_dir).await {
        Ok(result) => {
            println!(
                "\n✨ SUCCESS! {} orders loaded in {:.2?}",
                result.orders,
                start.elapsed()
            );
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
