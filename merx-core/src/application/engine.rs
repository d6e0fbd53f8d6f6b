// merx-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

// Imports Hexagonaux
use crate::error::MerxError;
use crate::ports::store::Store;

/// Execute a raw ad-hoc SQL statement with instrumentation (logs +
/// timing). Results are not fetched; use `merx inspect` or the
/// reporting layer to look at data.
#[instrument(skip(store), fields(query.len = query.len()))]
pub async fn execute_query(store: &dyn Store, query: &str) -> Result<(), MerxError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = store.execute(query).await;

    let duration = start.elapsed();

    match result {
        Ok(_) => {
            debug!("✅ Query finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            // Logged here to keep the timing context, re-raised for the caller
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
