// merx-core/src/domain/catalog/customer.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const LOCATIONS: [&str; 4] = ["London", "Manchester", "Birmingham", "Edinburgh"];

pub const SEGMENTS: [&str; 3] = ["Premium", "Standard", "Basic"];
pub const SEGMENT_WEIGHTS: [f64; 3] = [0.2, 0.5, 0.3];

/// Raw customer row, exactly as persisted in `customers.csv`.
///
/// Eq + Hash are derived so whole-row duplicate detection can run on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CustomerRecord {
    pub customer_id: u32,
    pub name: String,
    pub email: String,
    pub signup_date: String,
    pub location: String,
    pub age: u32,
    pub customer_segment: String,
}

/// Customer enriched by the transform stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub customer_id: u32,
    pub name: String,
    pub email: String,
    pub signup_date: NaiveDate,
    pub location: String,
    pub age: u32,
    pub customer_segment: String,
    /// Relative to the wall clock at transform time. Non-idempotent on purpose.
    pub days_since_signup: i64,
}
