// merx/src/commands/query.rs
//
// USE CASE: Execute a raw SQL statement (ad-hoc). The statement is not
// fetched back; use `merx inspect` to look at rows.

use anyhow::Context;
use merx_core::application::execute_query;
use merx_core::infrastructure::adapters::DuckDbStore;

pub async fn execute(db_path: String, query: String) -> anyhow::Result<()> {
    let store =
        DuckDbStore::new(&db_path).with_context(|| format!("Failed to open DuckDB at {db_path}"))?;

    if let Err(e) = execute_query(&store, &query).await {
        eprintln!("❌ Query failed: {}", e);
        std::process::exit(1);
    }

    println!("✅ Query executed successfully");
    Ok(())
}
