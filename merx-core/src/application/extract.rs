// merx-core/src/application/extract.rs
//
// USE CASE: Read the three persisted datasets back into memory.
// All-or-nothing: a missing or malformed file aborts the pipeline.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::application::generate::Dataset;
use crate::domain::catalog::{CUSTOMERS_CSV, ORDERS_CSV, PRODUCTS_JSON, ProductRecord};
use crate::error::MerxError;
use crate::infrastructure::error::InfrastructureError;

pub fn extract(data_dir: &Path) -> Result<Dataset, MerxError> {
    println!("📥 Starting data extraction...");

    // Extract from CSV
    let customers = read_csv(&data_dir.join(CUSTOMERS_CSV))?;
    let orders = read_csv(&data_dir.join(ORDERS_CSV))?;

    // Extract from JSON
    let products = read_json(&data_dir.join(PRODUCTS_JSON))?;

    info!("✅ Extracted {} customers", customers.len());
    info!("✅ Extracted {} products", products.len());
    info!("✅ Extracted {} orders", orders.len());

    Ok(Dataset {
        customers,
        products,
        orders,
    })
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, MerxError> {
    ensure_exists(path)?;
    let mut rdr = csv::Reader::from_path(path).map_err(InfrastructureError::Csv)?;
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(InfrastructureError::Csv)?;
    Ok(rows)
}

fn read_json(path: &Path) -> Result<Vec<ProductRecord>, MerxError> {
    ensure_exists(path)?;
    let content = std::fs::read_to_string(path)?;
    let products = serde_json::from_str(&content).map_err(InfrastructureError::Json)?;
    Ok(products)
}

fn ensure_exists(path: &Path) -> Result<(), MerxError> {
    if !path.exists() {
        return Err(InfrastructureError::SourceNotFound(path.display().to_string()).into());
    }
    Ok(())
}
