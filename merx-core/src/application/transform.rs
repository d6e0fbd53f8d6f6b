// merx-core/src/application/transform.rs
//
// USE CASE: Parse date columns, derive the computed fields, run the
// data-quality checks. Pure except for `today`, which the caller takes
// from the wall clock.

use chrono::{Datelike, NaiveDate};

use crate::application::generate::Dataset;
use crate::domain::catalog::{Customer, MONTH_FORMAT, Order, Product, parse_date};
use crate::domain::quality::{QualityReport, check_quality};
use crate::error::MerxError;

/// The three tables after enrichment, plus the quality findings.
#[derive(Debug, Clone)]
pub struct TransformedData {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub quality: QualityReport,
}

pub fn transform(dataset: &Dataset, today: NaiveDate) -> Result<TransformedData, MerxError> {
    println!("🔧 Starting data transformation...");

    let customers = dataset
        .customers
        .iter()
        .map(|c| {
            let signup_date = parse_date("signup_date", &c.signup_date)?;
            Ok(Customer {
                customer_id: c.customer_id,
                name: c.name.clone(),
                email: c.email.clone(),
                signup_date,
                location: c.location.clone(),
                age: c.age,
                customer_segment: c.customer_segment.clone(),
                days_since_signup: (today - signup_date).num_days(),
            })
        })
        .collect::<Result<Vec<_>, MerxError>>()?;

    let orders = dataset
        .orders
        .iter()
        .map(|o| {
            let order_date = parse_date("order_date", &o.order_date)?;
            Ok(Order {
                order_id: o.order_id,
                customer_id: o.customer_id,
                order_date,
                total_amount: o.total_amount,
                status: o.status.clone(),
                order_month: order_date.format(MONTH_FORMAT).to_string(),
                order_year: order_date.year(),
            })
        })
        .collect::<Result<Vec<_>, MerxError>>()?;

    let products = dataset
        .products
        .iter()
        .map(|p| Product {
            product_id: p.product_id,
            name: p.name.clone(),
            category: p.category.clone(),
            price: p.price,
            cost: p.cost,
            stock_quantity: p.stock_quantity,
            profit_margin: p.margin_pct(),
        })
        .collect();

    // Data quality checks: log, never fail
    println!("   🧪 Performing data quality checks...");
    let quality = check_quality(&dataset.customers, &dataset.products, &dataset.orders);
    quality.log_warnings();

    println!("   ✅ Data transformation completed");

    Ok(TransformedData {
        customers,
        products,
        orders,
        quality,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CustomerRecord, OrderRecord, ProductRecord};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
    }

    fn small_dataset() -> Dataset {
        Dataset {
            customers: vec![CustomerRecord {
                customer_id: 1,
                name: "Customer_1".into(),
                email: "user1@email.com".into(),
                signup_date: "2023-01-11".into(),
                location: "London".into(),
                age: 28,
                customer_segment: "Premium".into(),
            }],
            products: vec![ProductRecord {
                product_id: 1,
                name: "Home_Product_1".into(),
                category: "Home".into(),
                price: 250.0,
                cost: 150.0,
                stock_quantity: 12,
            }],
            orders: vec![OrderRecord {
                order_id: 1,
                customer_id: 1,
                order_date: "2023-06-05".into(),
                total_amount: 99.99,
                status: "Completed".into(),
            }],
        }
    }

    #[test]
    fn test_derived_fields() {
        let data = transform(&small_dataset(), fixed_today()).unwrap();

        assert_eq!(data.customers[0].days_since_signup, 354);
        assert_eq!(data.orders[0].order_month, "2023-06");
        assert_eq!(data.orders[0].order_year, 2023);
        assert_eq!(data.products[0].profit_margin, 40.0);
        assert!(data.quality.is_clean());
    }

    #[test]
    fn test_base_fields_pass_through_unchanged() {
        let data = transform(&small_dataset(), fixed_today()).unwrap();

        assert_eq!(data.customers[0].customer_id, 1);
        assert_eq!(data.orders[0].total_amount, 99.99);
        assert_eq!(data.products[0].price, 250.0);
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let mut dataset = small_dataset();
        dataset.orders[0].order_date = "05/06/2023".into();

        let result = transform(&dataset, fixed_today());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("order_date"));
    }

    #[test]
    fn test_duplicate_customers_reported_not_fatal() {
        let mut dataset = small_dataset();
        dataset.customers.push(dataset.customers[0].clone());

        let data = transform(&dataset, fixed_today()).unwrap();
        assert_eq!(data.quality.duplicate_customers, 1);
        assert_eq!(data.customers.len(), 2);
    }
}
