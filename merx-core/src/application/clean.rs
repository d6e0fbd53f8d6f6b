// merx-core/src/application/clean.rs

use crate::application::pipeline::ETL_SUMMARY_FILE;
use crate::error::MerxError;
use crate::infrastructure::config::load_pipeline_config;
use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::path::Path;

pub fn clean_project(project_dir: &Path) -> Result<(), MerxError> {
    tracing::info!("🧹 Initializing merx cleanup sequence...");

    let config = load_pipeline_config(project_dir).map_err(MerxError::Infrastructure)?;

    let targets = if config.clean_targets.is_empty() {
        vec![
            config.data_path,
            config.db_path,
            config.charts_path,
            ETL_SUMMARY_FILE.to_string(),
        ]
    } else {
        config.clean_targets
    };

    for target_rel_path in targets {
        // Zero-Trust Path Traversal Guard: targets must stay inside the
        // project, so absolute paths and '..' hops are rejected outright.
        let escapes_project = {
            let rel = Path::new(&target_rel_path);
            rel.is_absolute()
                || rel
                    .components()
                    .any(|c| matches!(c, std::path::Component::ParentDir))
        };
        if escapes_project {
            return Err(MerxError::UnsafePath(target_rel_path));
        }

        let full_path = project_dir.join(&target_rel_path);

        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)
                    .map_err(|e| MerxError::Infrastructure(InfrastructureError::Io(e)))?;
            } else {
                fs::remove_file(&full_path)
                    .map_err(|e| MerxError::Infrastructure(InfrastructureError::Io(e)))?;
            }
            println!("   🗑️  Artifact removed: {}", target_rel_path);
        }
    }

    Ok(())
}
