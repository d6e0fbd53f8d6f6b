// merx-core/src/domain/catalog/product.rs

use serde::{Deserialize, Serialize};

use super::round2;

pub const CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Books", "Home", "Sports"];

/// Unit cost as a fraction of the sale price (40% margin).
pub const COST_RATIO: f64 = 0.6;

/// Raw product record, exactly as persisted in `products.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub product_id: u32,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
    pub stock_quantity: u32,
}

impl ProductRecord {
    /// Profit margin percentage, rounded to two decimals.
    pub fn margin_pct(&self) -> f64 {
        round2((self.price - self.cost) / self.price * 100.0)
    }
}

/// Product enriched by the transform stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub product_id: u32,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
    pub stock_quantity: u32,
    pub profit_margin: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_pct() {
        let p = ProductRecord {
            product_id: 1,
            name: "Books_Product_1".into(),
            category: "Books".into(),
            price: 100.0,
            cost: 60.0,
            stock_quantity: 10,
        };
        assert_eq!(p.margin_pct(), 40.0);
    }
}
