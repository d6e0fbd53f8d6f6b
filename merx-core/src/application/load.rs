// merx-core/src/application/load.rs
//
// USE CASE: Persist the transformed tables into the relational store.
// Full-table replace semantics, then the four secondary indexes the
// reporting layer depends on.

use tracing::info;

use crate::application::transform::TransformedData;
use crate::error::MerxError;
use crate::ports::store::Store;

pub async fn load(store: &dyn Store, data: &TransformedData) -> Result<(), MerxError> {
    println!("💾 Loading data into {} store...", store.engine_name());

    store.replace_customers(&data.customers).await?;
    store.replace_products(&data.products).await?;
    store.replace_orders(&data.orders).await?;

    // Indexes for the reporting layer's query patterns
    store.create_indexes().await?;

    info!(
        customers = data.customers.len(),
        products = data.products.len(),
        orders = data.orders.len(),
        "✅ Data loaded successfully into database"
    );

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::generate::generate;
    use crate::application::transform::transform;
    use crate::infrastructure::adapters::DuckDbStore;
    use anyhow::Result;
    use chrono::NaiveDate;

    fn transformed() -> TransformedData {
        let dataset = generate(10, 8, 30, 42).unwrap();
        transform(&dataset, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_load_populates_all_tables() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        let data = transformed();

        load(&store, &data).await?;

        let count = store
            .query("SELECT COUNT(*) FROM orders", &["count"])
            .await?;
        assert_eq!(count.rows[0][0], "30");
        Ok(())
    }

    #[tokio::test]
    async fn test_load_twice_replaces_not_accumulates() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        let data = transformed();

        load(&store, &data).await?;
        load(&store, &data).await?;

        let reloaded = store.fetch_customers().await?;
        assert_eq!(reloaded.len(), data.customers.len());
        assert_eq!(reloaded, data.customers);
        Ok(())
    }
}
