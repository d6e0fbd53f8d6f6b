// merx-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::ValueRef;
use duckdb::{Config, Connection, params};
use std::sync::{Arc, Mutex, MutexGuard};

// Imports Hexagonaux
use crate::domain::catalog::{Customer, Order, Product, parse_date};
use crate::error::MerxError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::store::{QueryResult, Store};

pub struct DuckDbStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbStore {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, MerxError> {
        self.conn.lock().map_err(|_| {
            MerxError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

fn db_err(e: duckdb::Error) -> MerxError {
    MerxError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDb(e)))
}

/// Render a single cell for console display.
fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Boolean(b) => b.to_string(),
        ValueRef::TinyInt(i) => i.to_string(),
        ValueRef::SmallInt(i) => i.to_string(),
        ValueRef::Int(i) => i.to_string(),
        ValueRef::BigInt(i) => i.to_string(),
        ValueRef::UTinyInt(i) => i.to_string(),
        ValueRef::USmallInt(i) => i.to_string(),
        ValueRef::UInt(i) => i.to_string(),
        ValueRef::UBigInt(i) => i.to_string(),
        ValueRef::Float(f) => f.to_string(),
        ValueRef::Double(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        other => format!("{other:?}"),
    }
}

#[async_trait]
impl Store for DuckDbStore {
    async fn execute(&self, sql: &str) -> Result<(), MerxError> {
        let conn = self.lock()?;
        conn.execute(sql, []).map(|_rows| ()).map_err(db_err)
    }

    async fn query(&self, sql: &str, columns: &[&str]) -> Result<QueryResult, MerxError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(db_err)?;
        let mut rows = stmt.query([]).map_err(db_err)?;

        let mut result = QueryResult {
            columns: columns.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        };
        while let Some(row) = rows.next().map_err(db_err)? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(render_value(row.get_ref(i).map_err(db_err)?));
            }
            result.rows.push(values);
        }

        Ok(result)
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<String>, MerxError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info('{}')", table))
            .map_err(db_err)?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>("name"))
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;

        Ok(names)
    }

    async fn replace_customers(&self, rows: &[Customer]) -> Result<(), MerxError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(db_err)?;
        tx.execute_batch(
            "CREATE OR REPLACE TABLE customers (
                customer_id UINTEGER,
                name VARCHAR,
                email VARCHAR,
                signup_date VARCHAR,
                location VARCHAR,
                age UINTEGER,
                customer_segment VARCHAR,
                days_since_signup BIGINT
            )",
        )
        .map_err(db_err)?;
        {
            let mut app = tx.appender("customers").map_err(db_err)?;
            for c in rows {
                app.append_row(params![
                    c.customer_id,
                    c.name,
                    c.email,
                    c.signup_date.to_string(),
                    c.location,
                    c.age,
                    c.customer_segment,
                    c.days_since_signup,
                ])
                .map_err(db_err)?;
            }
        }
        tx.commit().map_err(db_err)
    }

    async fn replace_products(&self, rows: &[Product]) -> Result<(), MerxError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(db_err)?;
        tx.execute_batch(
            "CREATE OR REPLACE TABLE products (
                product_id UINTEGER,
                name VARCHAR,
                category VARCHAR,
                price DOUBLE,
                cost DOUBLE,
                stock_quantity UINTEGER,
                profit_margin DOUBLE
            )",
        )
        .map_err(db_err)?;
        {
            let mut app = tx.appender("products").map_err(db_err)?;
            for p in rows {
                app.append_row(params![
                    p.product_id,
                    p.name,
                    p.category,
                    p.price,
                    p.cost,
                    p.stock_quantity,
                    p.profit_margin,
                ])
                .map_err(db_err)?;
            }
        }
        tx.commit().map_err(db_err)
    }

    async fn replace_orders(&self, rows: &[Order]) -> Result<(), MerxError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(db_err)?;
        tx.execute_batch(
            "CREATE OR REPLACE TABLE orders (
                order_id UINTEGER,
                customer_id UINTEGER,
                order_date VARCHAR,
                total_amount DOUBLE,
                status VARCHAR,
                order_month VARCHAR,
                order_year INTEGER
            )",
        )
        .map_err(db_err)?;
        {
            let mut app = tx.appender("orders").map_err(db_err)?;
            for o in rows {
                app.append_row(params![
                    o.order_id,
                    o.customer_id,
                    o.order_date.to_string(),
                    o.total_amount,
                    o.status,
                    o.order_month,
                    o.order_year,
                ])
                .map_err(db_err)?;
            }
        }
        tx.commit().map_err(db_err)
    }

    async fn create_indexes(&self) -> Result<(), MerxError> {
        let conn = self.lock()?;
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_customer_id ON customers(customer_id);
             CREATE INDEX IF NOT EXISTS idx_product_id ON products(product_id);
             CREATE INDEX IF NOT EXISTS idx_order_date ON orders(order_date);
             CREATE INDEX IF NOT EXISTS idx_order_customer ON orders(customer_id);",
        )
        .map_err(db_err)
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, MerxError> {
        let raw = {
            let conn = self.lock()?;
            let mut stmt = conn
                .prepare(
                    "SELECT customer_id, name, email, signup_date, location, age,
                            customer_segment, days_since_signup
                     FROM customers ORDER BY customer_id",
                )
                .map_err(db_err)?;
            stmt.query_map([], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, u32>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, i64>(7)?,
                ))
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?
        };

        // Dates come back as VARCHAR; re-parse on the way out.
        raw.into_iter()
            .map(|(id, name, email, signup, location, age, segment, days)| {
                Ok(Customer {
                    customer_id: id,
                    name,
                    email,
                    signup_date: parse_date("signup_date", &signup)?,
                    location,
                    age,
                    customer_segment: segment,
                    days_since_signup: days,
                })
            })
            .collect()
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, MerxError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT product_id, name, category, price, cost, stock_quantity, profit_margin
                 FROM products ORDER BY product_id",
            )
            .map_err(db_err)?;
        let products = stmt
            .query_map([], |row| {
                Ok(Product {
                    product_id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    price: row.get(3)?,
                    cost: row.get(4)?,
                    stock_quantity: row.get(5)?,
                    profit_margin: row.get(6)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;

        Ok(products)
    }

    async fn fetch_completed_orders(&self) -> Result<Vec<Order>, MerxError> {
        let raw = {
            let conn = self.lock()?;
            let mut stmt = conn
                .prepare(
                    "SELECT order_id, customer_id, order_date, total_amount, status,
                            order_month, order_year
                     FROM orders WHERE status = 'Completed' ORDER BY order_id",
                )
                .map_err(db_err)?;
            stmt.query_map([], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, i32>(6)?,
                ))
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?
        };

        raw.into_iter()
            .map(|(id, customer_id, date, total, status, month, year)| {
                Ok(Order {
                    order_id: id,
                    customer_id,
                    order_date: parse_date("order_date", &date)?,
                    total_amount: total,
                    status,
                    order_month: month,
                    order_year: year,
                })
            })
            .collect()
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;

    fn sample_customers() -> Vec<Customer> {
        vec![
            Customer {
                customer_id: 1,
                name: "Customer_1".into(),
                email: "user1@email.com".into(),
                signup_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                location: "London".into(),
                age: 34,
                customer_segment: "Premium".into(),
                days_since_signup: 100,
            },
            Customer {
                customer_id: 2,
                name: "Customer_2".into(),
                email: "user2@email.com".into(),
                signup_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
                location: "Edinburgh".into(),
                age: 51,
                customer_segment: "Basic".into(),
                days_since_signup: 99,
            },
        ]
    }

    fn sample_orders() -> Vec<Order> {
        vec![
            Order {
                order_id: 1,
                customer_id: 1,
                order_date: NaiveDate::from_ymd_opt(2023, 3, 14).unwrap(),
                total_amount: 120.50,
                status: "Completed".into(),
                order_month: "2023-03".into(),
                order_year: 2023,
            },
            Order {
                order_id: 2,
                customer_id: 2,
                order_date: NaiveDate::from_ymd_opt(2023, 4, 2).unwrap(),
                total_amount: 40.0,
                status: "Cancelled".into(),
                order_month: "2023-04".into(),
                order_year: 2023,
            },
        ]
    }

    #[tokio::test]
    async fn test_replace_and_fetch_roundtrip() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        let customers = sample_customers();

        store.replace_customers(&customers).await?;
        let reloaded = store.fetch_customers().await?;
        assert_eq!(reloaded, customers);
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_is_idempotent() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        let customers = sample_customers();

        store.replace_customers(&customers).await?;
        store.replace_customers(&customers).await?;

        let reloaded = store.fetch_customers().await?;
        assert_eq!(reloaded.len(), customers.len());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_completed_orders_filters_status() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        store.replace_orders(&sample_orders()).await?;

        let completed = store.fetch_completed_orders().await?;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].order_id, 1);
        assert!(completed[0].is_completed());
        Ok(())
    }

    #[tokio::test]
    async fn test_indexes_created_after_load() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        store.replace_customers(&sample_customers()).await?;
        store
            .replace_products(&[Product {
                product_id: 1,
                name: "Books_Product_1".into(),
                category: "Books".into(),
                price: 20.0,
                cost: 12.0,
                stock_quantity: 3,
                profit_margin: 40.0,
            }])
            .await?;
        store.replace_orders(&sample_orders()).await?;

        store.create_indexes().await?;
        // Recreating must be a no-op, not an error
        store.create_indexes().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_table_columns() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        store.replace_orders(&sample_orders()).await?;

        let columns = store.table_columns("orders").await?;
        assert_eq!(columns, vec![
            "order_id",
            "customer_id",
            "order_date",
            "total_amount",
            "status",
            "order_month",
            "order_year",
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn test_query_renders_cells() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        store.replace_orders(&sample_orders()).await?;

        let result = store
            .query(
                "SELECT status, COUNT(*) AS n FROM orders GROUP BY status ORDER BY status",
                &["status", "n"],
            )
            .await?;
        assert_eq!(result.columns, vec!["status", "n"]);
        assert_eq!(result.rows, vec![
            vec!["Cancelled".to_string(), "1".to_string()],
            vec!["Completed".to_string(), "1".to_string()],
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_sql_is_an_error() -> Result<()> {
        let store = DuckDbStore::new(":memory:")?;
        let result = store.execute("SELECT * FROM non_existent_table").await;
        assert!(result.is_err());
        Ok(())
    }
}
