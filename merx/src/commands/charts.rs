// merx/src/commands/charts.rs
//
// USE CASE: Render the four chart dashboards.

use std::path::PathBuf;

use anyhow::Context;
use merx_core::application::render_all;
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

    let charts_dir = project_dir.join(&config.charts_path);
    if let Err(e) = render_all(&store, &charts_dir).await {
        eprintln!("❌ Chart generation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
