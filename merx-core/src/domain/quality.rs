// merx-core/src/domain/quality.rs
//
// Data-quality checks run by the transform stage. Anomalies are logged
// as warnings, never raised: a dirty batch still loads.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::domain::catalog::{CustomerRecord, OrderRecord, ProductRecord};

#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityReport {
    pub customers_missing: usize,
    pub products_missing: usize,
    pub orders_missing: usize,
    pub duplicate_customers: usize,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.customers_missing == 0
            && self.products_missing == 0
            && self.orders_missing == 0
            && self.duplicate_customers == 0
    }

    /// One warning per nonzero counter, mirroring the taxonomy in the
    /// error-handling design: quality anomalies are non-fatal.
    pub fn log_warnings(&self) {
        if self.customers_missing > 0 {
            warn!("⚠️ {} missing values in customers data", self.customers_missing);
        }
        if self.products_missing > 0 {
            warn!("⚠️ {} missing values in products data", self.products_missing);
        }
        if self.orders_missing > 0 {
            warn!("⚠️ {} missing values in orders data", self.orders_missing);
        }
        if self.duplicate_customers > 0 {
            warn!("⚠️ {} duplicate customers found", self.duplicate_customers);
        }
    }
}

/// Count missing cells per table and duplicate whole rows in customers.
///
/// Once a record has deserialized, only text columns can still be
/// "missing" (empty); numeric columns either parsed or the extract
/// stage already failed.
pub fn check_quality(
    customers: &[CustomerRecord],
    products: &[ProductRecord],
    orders: &[OrderRecord],
) -> QualityReport {
    let customers_missing = customers
        .iter()
        .map(|c| {
            count_empty(&[
                c.name.as_str(),
                c.email.as_str(),
                c.signup_date.as_str(),
                c.location.as_str(),
                c.customer_segment.as_str(),
            ])
        })
        .sum();

    let products_missing = products
        .iter()
        .map(|p| count_empty(&[p.name.as_str(), p.category.as_str()]))
        .sum();

    let orders_missing = orders
        .iter()
        .map(|o| count_empty(&[o.order_date.as_str(), o.status.as_str()]))
        .sum();

    let mut seen: HashSet<&CustomerRecord> = HashSet::with_capacity(customers.len());
    let duplicate_customers = customers.iter().filter(|c| !seen.insert(*c)).count();

    QualityReport {
        customers_missing,
        products_missing,
        orders_missing,
        duplicate_customers,
    }
}

fn count_empty(cells: &[&str]) -> usize {
    cells.iter().filter(|c| c.trim().is_empty()).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn customer(id: u32, email: &str) -> CustomerRecord {
        CustomerRecord {
            customer_id: id,
            name: format!("Customer_{id}"),
            email: email.to_string(),
            signup_date: "2023-01-01".into(),
            location: "London".into(),
            age: 30,
            customer_segment: "Standard".into(),
        }
    }

    #[test]
    fn test_clean_batch() {
        let customers = vec![customer(1, "a@email.com"), customer(2, "b@email.com")];
        let report = check_quality(&customers, &[], &[]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_cells_counted() {
        let customers = vec![customer(1, ""), customer(2, "  ")];
        let report = check_quality(&customers, &[], &[]);
        assert_eq!(report.customers_missing, 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_duplicate_customers_counted() {
        let customers = vec![
            customer(1, "a@email.com"),
            customer(1, "a@email.com"),
            customer(2, "b@email.com"),
        ];
        let report = check_quality(&customers, &[], &[]);
        assert_eq!(report.duplicate_customers, 1);
    }
}
