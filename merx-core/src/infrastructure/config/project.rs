// merx-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub name: String,

    /// Where the generator writes and the extractor reads the datasets.
    pub data_path: String,
    /// File-backed DuckDB database.
    pub db_path: String,
    /// Where the chart layer writes its PNG dashboards.
    pub charts_path: String,

    // --- Generator sizing ---
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    /// RNG seed, fixed for reproducible datasets.
    pub seed: u64,

    /// Artifacts removed by `merx clean`. Empty means "derive from the
    /// paths above".
    pub clean_targets: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: "merx".to_string(),
            data_path: "data".to_string(),
            db_path: "merx.duckdb".to_string(),
            charts_path: "charts".to_string(),
            customers: 1000,
            products: 100,
            orders: 5000,
            seed: 42,
            clean_targets: Vec::new(),
        }
    }
}

// --- LOADER ---

/// Load `merx.yaml` from the project directory. A missing file is not
/// an error: every component must also run bare, with defaults.
#[instrument(skip(project_dir))]
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading project configuration");
            let content = fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&content)?
        }
        None => {
            info!("No merx.yaml found, using defaults");
            PipelineConfig::default()
        }
    };

    // Override via Variables d'Environnement (Pattern 'Layering')
    // Permet de faire: MERX_DB_PATH=/tmp/test.duckdb merx etl
    apply_env_overrides(&mut config)?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    let candidates = ["merx.yaml", "merx_project_conf.yaml"];
    candidates
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

fn apply_env_overrides(config: &mut PipelineConfig) -> Result<(), InfrastructureError> {
    if let Ok(val) = std::env::var("MERX_DATA_PATH") {
        info!(old = ?config.data_path, new = ?val, "Overriding data path via ENV");
        config.data_path = val;
    }
    if let Ok(val) = std::env::var("MERX_DB_PATH") {
        info!(old = ?config.db_path, new = ?val, "Overriding db path via ENV");
        config.db_path = val;
    }
    if let Ok(val) = std::env::var("MERX_CHARTS_PATH") {
        info!(old = ?config.charts_path, new = ?val, "Overriding charts path via ENV");
        config.charts_path = val;
    }
    if let Ok(val) = std::env::var("MERX_SEED") {
        let seed = val.parse::<u64>().map_err(|_| {
            InfrastructureError::ConfigError(format!("MERX_SEED must be an integer, got '{val}'"))
        })?;
        info!(old = config.seed, new = seed, "Overriding seed via ENV");
        config.seed = seed;
    }
    Ok(())
}
