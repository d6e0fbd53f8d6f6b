// merx/src/commands/inspect.rs
//
// USE CASE: Inspect a store table (schema + sample rows).

use std::path::Path;

use merx_core::infrastructure::adapters::DuckDbStore;
use merx_core::ports::store::Store;

pub async fn execute(db_path: String, table: String, limit: usize) -> anyhow::Result<()> {
    if !Path::new(&db_path).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'merx etl'?",
            db_path
        );
    }

    let store = DuckDbStore::new(&db_path)?;

    println!("\n🔍 Inspecting Table: '{}'", table);

    let column_names = store.table_columns(&table).await?;
    println!("   Columns: [{}]", column_names.join(", "));
    println!("   --- Rows (Limit {}) ---", limit);

    let columns: Vec<&str> = column_names.iter().map(String::as_str).collect();
    let sample = store
        .query(&format!("SELECT * FROM {} LIMIT {}", table, limit), &columns)
        .await?;

    for row in &sample.rows {
        println!("   ➜ {}", row.join(" | "));
    }

    Ok(())
}
