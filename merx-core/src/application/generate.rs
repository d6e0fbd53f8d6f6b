// merx-core/src/application/generate.rs
//
// USE CASE: Generate the synthetic datasets (customers, products,
// orders) from a seeded RNG and persist them as CSV + JSON.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::DomainError;
use crate::domain::catalog::{
    CATEGORIES, COST_RATIO, CUSTOMERS_CSV, CustomerRecord, DATE_FORMAT, ITEM_COUNT_WEIGHTS,
    LOCATIONS, ORDERS_CSV, OrderRecord, PRODUCTS_JSON, ProductRecord, SEGMENT_WEIGHTS, SEGMENTS,
    STATUS_WEIGHTS, STATUSES, round2,
};
use crate::error::MerxError;
use crate::infrastructure::config::PipelineConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

/// The three raw datasets, as they exist on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub customers: Vec<CustomerRecord>,
    pub products: Vec<ProductRecord>,
    pub orders: Vec<OrderRecord>,
}

/// One line of an order basket. Only the rolled-up total survives into
/// the persisted OrderRecord.
#[derive(Debug, Clone)]
struct LineItem {
    #[allow(dead_code)]
    product_id: u32,
    quantity: u32,
    unit_price: f64,
}

/// First signup date; customers sign up one per day from here.
/// Orders fall in the 365 days following the same date.
fn catalog_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

fn internal(err: impl std::fmt::Display) -> MerxError {
    MerxError::InternalError(err.to_string())
}

/// Generate all three datasets from one seeded RNG. Same seed, same
/// counts: identical output.
pub fn generate(
    customers: usize,
    products: usize,
    orders: usize,
    seed: u64,
) -> Result<Dataset, MerxError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let customers = generate_customers(&mut rng, customers)?;
    let products = generate_products(&mut rng, products);
    let orders = generate_orders(&mut rng, &customers, &products, orders)?;

    Ok(Dataset {
        customers,
        products,
        orders,
    })
}

fn generate_customers(rng: &mut StdRng, n: usize) -> Result<Vec<CustomerRecord>, MerxError> {
    let segment_idx = WeightedIndex::new(SEGMENT_WEIGHTS).map_err(internal)?;
    let epoch = catalog_epoch();

    let customers = (1..=n)
        .map(|i| CustomerRecord {
            customer_id: i as u32,
            name: format!("Customer_{i}"),
            email: format!("user{i}@email.com"),
            // One signup per day, starting at the epoch
            signup_date: (epoch + Duration::days(i as i64 - 1))
                .format(DATE_FORMAT)
                .to_string(),
            location: LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_string(),
            age: rng.gen_range(18..70),
            customer_segment: SEGMENTS[segment_idx.sample(rng)].to_string(),
        })
        .collect();

    Ok(customers)
}

fn generate_products(rng: &mut StdRng, n: usize) -> Vec<ProductRecord> {
    (1..=n)
        .map(|i| {
            let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let price = round2(rng.gen_range(10.0..500.0));
            ProductRecord {
                product_id: i as u32,
                name: format!("{category}_Product_{i}"),
                category: category.to_string(),
                price,
                cost: round2(price * COST_RATIO),
                stock_quantity: rng.gen_range(0..100),
            }
        })
        .collect()
}

fn generate_orders(
    rng: &mut StdRng,
    customers: &[CustomerRecord],
    products: &[ProductRecord],
    n: usize,
) -> Result<Vec<OrderRecord>, MerxError> {
    if customers.is_empty() {
        return Err(DomainError::EmptyCatalog("customers".into()).into());
    }
    if products.is_empty() {
        return Err(DomainError::EmptyCatalog("products".into()).into());
    }

    let item_count_idx = WeightedIndex::new(ITEM_COUNT_WEIGHTS).map_err(internal)?;
    let status_idx = WeightedIndex::new(STATUS_WEIGHTS).map_err(internal)?;

    let orders = (1..=n)
        .map(|i| {
            let (order, _items) =
                build_order(rng, i as u32, customers, products, &item_count_idx, &status_idx);
            order
        })
        .collect();

    Ok(orders)
}

/// Build one order: a random customer, 1-5 distinct products (skewed
/// toward small baskets), each at quantity 1-3. The basket's line items
/// are returned alongside so the total can be audited.
fn build_order(
    rng: &mut StdRng,
    order_id: u32,
    customers: &[CustomerRecord],
    products: &[ProductRecord],
    item_count_idx: &WeightedIndex<f64>,
    status_idx: &WeightedIndex<f64>,
) -> (OrderRecord, Vec<LineItem>) {
    let customer = &customers[rng.gen_range(0..customers.len())];
    let order_date = catalog_epoch() + Duration::days(rng.gen_range(0..365));

    let num_items = (item_count_idx.sample(rng) + 1).min(products.len());
    let items: Vec<LineItem> = products
        .choose_multiple(rng, num_items)
        .map(|p| LineItem {
            product_id: p.product_id,
            quantity: rng.gen_range(1..=3),
            unit_price: p.price,
        })
        .collect();

    let total: f64 = items
        .iter()
        .map(|item| item.unit_price * f64::from(item.quantity))
        .sum();

    let order = OrderRecord {
        order_id,
        customer_id: customer.customer_id,
        order_date: order_date.format(DATE_FORMAT).to_string(),
        total_amount: round2(total),
        status: STATUSES[status_idx.sample(rng)].to_string(),
    };

    (order, items)
}

/// Persist the datasets: row-oriented CSV for customers and orders,
/// structured JSON records for products.
pub fn write_dataset(dataset: &Dataset, data_dir: &Path) -> Result<(), MerxError> {
    write_csv(&dataset.customers, &data_dir.join(CUSTOMERS_CSV))?;
    write_csv(&dataset.orders, &data_dir.join(ORDERS_CSV))?;

    let json = serde_json::to_vec_pretty(&dataset.products).map_err(InfrastructureError::Json)?;
    atomic_write(data_dir.join(PRODUCTS_JSON), &json)?;

    Ok(())
}

fn write_csv<T: serde::Serialize>(rows: &[T], path: &Path) -> Result<(), MerxError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row).map_err(InfrastructureError::Csv)?;
    }
    let buf = wtr
        .into_inner()
        .map_err(|e| InfrastructureError::Io(e.into_error()))?;
    atomic_write(path, &buf)?;
    Ok(())
}

/// Full generation use case: build the datasets from the configured
/// counts and seed, then persist them under the project's data dir.
pub fn run_generate(config: &PipelineConfig, project_dir: &Path) -> Result<Dataset, MerxError> {
    println!("🎲 Generating synthetic e-commerce data (seed {})...", config.seed);

    let dataset = generate(config.customers, config.products, config.orders, config.seed)?;

    let data_dir = project_dir.join(&config.data_path);
    write_dataset(&dataset, &data_dir)?;

    println!("✅ Data generated successfully!");
    println!("   - {} customers", dataset.customers.len());
    println!("   - {} products", dataset.products.len());
    println!("   - {} orders", dataset.orders.len());

    Ok(dataset)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_exact_counts_and_statuses() {
        let dataset = generate(1000, 100, 5000, 42).unwrap();

        assert_eq!(dataset.customers.len(), 1000);
        assert_eq!(dataset.products.len(), 100);
        assert_eq!(dataset.orders.len(), 5000);

        for order in &dataset.orders {
            assert!(STATUSES.contains(&order.status.as_str()), "unexpected status {}", order.status);
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = generate(50, 20, 100, 7).unwrap();
        let b = generate(50, 20, 100, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_dataset() {
        let a = generate(50, 20, 100, 7).unwrap();
        let b = generate(50, 20, 100, 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_product_cost_is_sixty_percent_of_price() {
        let dataset = generate(10, 200, 10, 42).unwrap();
        for p in &dataset.products {
            assert!(p.price > 0.0);
            assert_eq!(p.cost, round2(p.price * COST_RATIO));
            assert!(p.cost < p.price, "cost {} not below price {}", p.cost, p.price);
        }
    }

    #[test]
    fn test_order_total_matches_line_items() {
        let mut rng = StdRng::seed_from_u64(13);
        let customers = generate_customers(&mut rng, 20).unwrap();
        let products = generate_products(&mut rng, 30);
        let item_count_idx = WeightedIndex::new(ITEM_COUNT_WEIGHTS).unwrap();
        let status_idx = WeightedIndex::new(STATUS_WEIGHTS).unwrap();

        for id in 1..=200 {
            let (order, items) =
                build_order(&mut rng, id, &customers, &products, &item_count_idx, &status_idx);

            assert!((1..=5).contains(&items.len()));

            let mut product_ids: Vec<u32> = items.iter().map(|i| i.product_id).collect();
            product_ids.sort_unstable();
            product_ids.dedup();
            assert_eq!(product_ids.len(), items.len(), "products repeated in basket");

            let expected: f64 = items
                .iter()
                .map(|i| {
                    assert!((1..=3).contains(&i.quantity));
                    i.unit_price * f64::from(i.quantity)
                })
                .sum();
            assert_eq!(order.total_amount, round2(expected));
            assert!(order.total_amount > 0.0);
        }
    }

    #[test]
    fn test_orders_need_a_product_catalog() {
        let mut rng = StdRng::seed_from_u64(1);
        let customers = generate_customers(&mut rng, 5).unwrap();
        let result = generate_orders(&mut rng, &customers, &[], 10);
        assert!(result.is_err());
    }

    #[test]
    fn test_customer_ids_sequential_and_unique() {
        let dataset = generate(100, 10, 10, 42).unwrap();
        for (i, c) in dataset.customers.iter().enumerate() {
            assert_eq!(c.customer_id, i as u32 + 1);
        }
    }

    #[test]
    fn test_write_dataset_roundtrip_files_exist() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = generate(5, 5, 5, 42).unwrap();

        write_dataset(&dataset, dir.path()).unwrap();

        assert!(dir.path().join(CUSTOMERS_CSV).exists());
        assert!(dir.path().join(PRODUCTS_JSON).exists());
        assert!(dir.path().join(ORDERS_CSV).exists());
    }
}
