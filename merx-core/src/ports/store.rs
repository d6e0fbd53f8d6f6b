// merx-core/src/ports/store.rs

// This file defines what the application needs from the relational
// store, without knowing how it's done. The loader replaces whole
// tables, the reporting layer runs read-only aggregates, the chart
// layer reloads typed rows. That is the entire contract.

use crate::domain::catalog::{Customer, Order, Product};
use crate::error::MerxError;
use async_trait::async_trait;

/// Engine-agnostic tabular result: every value is already rendered to
/// text, ready for console display.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Run a statement that returns no rows.
    async fn execute(&self, sql: &str) -> Result<(), MerxError>;

    /// Run a SELECT and collect the full result. The caller names the
    /// projected columns; the store extracts exactly that many values
    /// per row.
    async fn query(&self, sql: &str, columns: &[&str]) -> Result<QueryResult, MerxError>;

    /// Column names of a stored table.
    async fn table_columns(&self, table: &str) -> Result<Vec<String>, MerxError>;

    // --- LOAD (full-table replace, no merge, no versioning) ---
    async fn replace_customers(&self, rows: &[Customer]) -> Result<(), MerxError>;
    async fn replace_products(&self, rows: &[Product]) -> Result<(), MerxError>;
    async fn replace_orders(&self, rows: &[Order]) -> Result<(), MerxError>;

    /// Secondary indexes for the reporting layer's query patterns.
    async fn create_indexes(&self) -> Result<(), MerxError>;

    // --- RELOAD (chart layer; date columns re-parsed on the way out) ---
    async fn fetch_customers(&self) -> Result<Vec<Customer>, MerxError>;
    async fn fetch_products(&self) -> Result<Vec<Product>, MerxError>;
    async fn fetch_completed_orders(&self) -> Result<Vec<Order>, MerxError>;

    fn engine_name(&self) -> &str;
}
