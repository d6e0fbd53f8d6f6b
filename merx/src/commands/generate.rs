// merx/src/commands/generate.rs
//
// USE CASE: Generate the synthetic datasets.

use std::path::PathBuf;

use anyhow::Context;
use merx_core::application::run_generate;
use merx_core::infrastructure::config::load_pipeline_config;

pub fn execute(
    project_dir: PathBuf,
    customers: Option<usize>,
    products: Option<usize>,
    orders: Option<usize>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let mut config = load_pipeline_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;

    // CLI flags beat merx.yaml
    if let Some(n) = customers {
        config.customers = n;
    }
    if let Some(n) = products {
        config.products = n;
    }
    if let Some(n) = orders {
        config.orders = n;
    }
    if let Some(s) = seed {
        config.seed = s;
    }

    if let Err(e) = run_generate(&config, &project_dir) {
        eprintln!("❌ Generation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
