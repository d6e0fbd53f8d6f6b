// merx-core/src/domain/catalog/order.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const STATUSES: [&str; 3] = ["Completed", "Pending", "Cancelled"];
pub const STATUS_WEIGHTS: [f64; 3] = [0.85, 0.10, 0.05];

/// Distribution of line-item counts per order (1 to 5, skewed toward small baskets).
pub const ITEM_COUNT_WEIGHTS: [f64; 5] = [0.4, 0.3, 0.2, 0.08, 0.02];

/// Raw order row, exactly as persisted in `orders.csv`.
///
/// `customer_id` is a foreign key into the customers table; it is
/// intentionally never validated for existence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub order_id: u32,
    pub customer_id: u32,
    pub order_date: String,
    pub total_amount: f64,
    pub status: String,
}

/// Order enriched by the transform stage with month/year buckets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: u32,
    pub customer_id: u32,
    pub order_date: NaiveDate,
    pub total_amount: f64,
    pub status: String,
    /// "YYYY-MM" bucket used by the monthly aggregates.
    pub order_month: String,
    pub order_year: i32,
}

impl Order {
    pub fn is_completed(&self) -> bool {
        self.status == "Completed"
    }
}
