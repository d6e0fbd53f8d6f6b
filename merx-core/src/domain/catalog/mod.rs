// merx-core/src/domain/catalog/mod.rs

pub mod customer;
pub mod order;
pub mod product;

pub use customer::{Customer, CustomerRecord, LOCATIONS, SEGMENT_WEIGHTS, SEGMENTS};
pub use order::{ITEM_COUNT_WEIGHTS, Order, OrderRecord, STATUS_WEIGHTS, STATUSES};
pub use product::{CATEGORIES, COST_RATIO, Product, ProductRecord};

/// Serialized form of every date column in the pipeline.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Bucket format for monthly aggregates ("2023-04").
pub const MONTH_FORMAT: &str = "%Y-%m";

// The three dataset files exchanged between generator and extractor.
pub const CUSTOMERS_CSV: &str = "customers.csv";
pub const PRODUCTS_JSON: &str = "products.json";
pub const ORDERS_CSV: &str = "orders.csv";

/// Round a monetary or percentage value to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a serialized date cell, naming the offending column on failure.
pub fn parse_date(column: &str, value: &str) -> Result<chrono::NaiveDate, super::DomainError> {
    chrono::NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        super::DomainError::DateParse {
            column: column.to_string(),
            value: value.to_string(),
        }
    })
}
