// merx-core/src/application/pipeline.rs
//
// USE CASE: Run the whole ETL batch: Extract -> Transform -> Load.
// Strictly sequential; each stage fully completes before the next one
// starts, and the first failure aborts the run.

use std::path::Path;

use chrono::Local;

use crate::application::transform::TransformedData;
use crate::application::{extract, load, transform};
use crate::error::MerxError;
use crate::infrastructure::config::PipelineConfig;
use crate::infrastructure::fs::atomic_write;
use crate::ports::store::Store;

/// Artifact written next to the database after every successful run.
pub const ETL_SUMMARY_FILE: &str = "etl_summary.json";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct EtlResult {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    /// Sum over all orders, whatever their status.
    pub total_revenue: f64,
    pub first_order: Option<String>,
    pub last_order: Option<String>,
    pub quality_clean: bool,
}

pub async fn run_etl(
    store: &dyn Store,
    config: &PipelineConfig,
    project_dir: &Path,
) -> Result<EtlResult, MerxError> {
    println!("🚀 Starting ETL Pipeline...");
    let start_time = std::time::Instant::now();

    // 1. EXTRACT
    let dataset = extract::extract(&project_dir.join(&config.data_path))?;

    // 2. TRANSFORM ('days since signup' is relative to the wall clock)
    let data = transform::transform(&dataset, Local::now().date_naive())?;

    // 3. LOAD
    load::load(store, &data).await?;

    let duration = start_time.elapsed();
    println!("✅ ETL Pipeline completed in {:.2}s", duration.as_secs_f64());

    let result = summarize(&data);
    print_summary(&result);
    save_summary(&result, project_dir)?;

    Ok(result)
}

fn summarize(data: &TransformedData) -> EtlResult {
    let total_revenue: f64 = data.orders.iter().map(|o| o.total_amount).sum();
    let first_order = data.orders.iter().map(|o| o.order_date).min();
    let last_order = data.orders.iter().map(|o| o.order_date).max();

    EtlResult {
        customers: data.customers.len(),
        products: data.products.len(),
        orders: data.orders.len(),
        total_revenue,
        first_order: first_order.map(|d| d.to_string()),
        last_order: last_order.map(|d| d.to_string()),
        quality_clean: data.quality.is_clean(),
    }
}

fn print_summary(result: &EtlResult) {
    println!("\n{}", "=".repeat(50));
    println!("📊 ETL PIPELINE SUMMARY");
    println!("{}", "=".repeat(50));
    println!("- Customers: {}", result.customers);
    println!("- Products: {}", result.products);
    println!("- Orders: {}", result.orders);
    println!("- Total Revenue: £{:.2}", result.total_revenue);
    if let (Some(first), Some(last)) = (&result.first_order, &result.last_order) {
        println!("- Date Range: {first} to {last}");
    }
    println!("{}", "=".repeat(50));
}

fn save_summary(result: &EtlResult, project_dir: &Path) -> Result<(), MerxError> {
    let content = serde_json::to_string_pretty(result)
        .map_err(|e| MerxError::InternalError(format!("Serialization: {e}")))?;
    atomic_write(project_dir.join(ETL_SUMMARY_FILE), &content)?;
    Ok(())
}
