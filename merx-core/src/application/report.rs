// merx-core/src/application/report.rs
//
// USE CASE: The five fixed aggregate queries of the reporting layer.
// Each query is isolated: a failure is logged and surfaces as an
// absent result, the sibling queries still run.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tracing::{error, info};

use crate::ports::store::{QueryResult, Store};

pub struct ReportQuery {
    pub name: &'static str,
    pub sql: &'static str,
    pub columns: &'static [&'static str],
}

const BASIC_STATS_SQL: &str = "
    SELECT 'Customers' AS table_name, COUNT(*) AS count FROM customers
    UNION ALL
    SELECT 'Products' AS table_name, COUNT(*) AS count FROM products
    UNION ALL
    SELECT 'Orders' AS table_name, COUNT(*) AS count FROM orders
    UNION ALL
    SELECT 'Completed Orders' AS table_name, COUNT(*) AS count
    FROM orders WHERE status = 'Completed'";

const MONTHLY_REVENUE_SQL: &str = "
    SELECT
        order_month,
        ROUND(SUM(total_amount), 2) AS revenue,
        COUNT(*) AS order_count,
        ROUND(AVG(total_amount), 2) AS avg_order_value
    FROM orders
    WHERE status = 'Completed'
    GROUP BY order_month
    ORDER BY order_month";

const CUSTOMER_SEGMENTS_SQL: &str = "
    SELECT
        customer_segment,
        COUNT(*) AS customer_count,
        ROUND(AVG(CASE WHEN total_spent IS NULL THEN 0 ELSE total_spent END), 2) AS avg_spent
    FROM customers c
    LEFT JOIN (
        SELECT
            customer_id,
            SUM(total_amount) AS total_spent
        FROM orders
        WHERE status = 'Completed'
        GROUP BY customer_id
    ) o ON c.customer_id = o.customer_id
    GROUP BY customer_segment
    ORDER BY avg_spent DESC";

const GEOGRAPHIC_SQL: &str = "
    SELECT
        c.location,
        COUNT(DISTINCT c.customer_id) AS customer_count,
        COUNT(o.order_id) AS total_orders,
        ROUND(COALESCE(SUM(o.total_amount), 0), 2) AS total_revenue
    FROM customers c
    LEFT JOIN orders o ON c.customer_id = o.customer_id AND o.status = 'Completed'
    GROUP BY c.location
    ORDER BY total_revenue DESC";

const TOP_MONTHS_SQL: &str = "
    SELECT
        order_month,
        ROUND(SUM(total_amount), 2) AS revenue,
        COUNT(*) AS orders
    FROM orders
    WHERE status = 'Completed'
    GROUP BY order_month
    ORDER BY revenue DESC
    LIMIT 5";

pub const REPORT_QUERIES: [ReportQuery; 5] = [
    ReportQuery {
        name: "Database Overview",
        sql: BASIC_STATS_SQL,
        columns: &["table_name", "count"],
    },
    ReportQuery {
        name: "Monthly Revenue",
        sql: MONTHLY_REVENUE_SQL,
        columns: &["order_month", "revenue", "order_count", "avg_order_value"],
    },
    ReportQuery {
        name: "Customer Segments",
        sql: CUSTOMER_SEGMENTS_SQL,
        columns: &["customer_segment", "customer_count", "avg_spent"],
    },
    ReportQuery {
        name: "Geographic Performance",
        sql: GEOGRAPHIC_SQL,
        columns: &["location", "customer_count", "total_orders", "total_revenue"],
    },
    ReportQuery {
        name: "Top Revenue Months",
        sql: TOP_MONTHS_SQL,
        columns: &["order_month", "revenue", "orders"],
    },
];

/// Run all five analyses. A `None` entry means that one query failed.
pub async fn run_report(store: &dyn Store) -> Vec<(&'static str, Option<QueryResult>)> {
    let mut results = Vec::with_capacity(REPORT_QUERIES.len());
    for query in &REPORT_QUERIES {
        results.push((query.name, run_single(store, query).await));
    }
    results
}

async fn run_single(store: &dyn Store, query: &ReportQuery) -> Option<QueryResult> {
    info!("🔍 Running {}...", query.name);
    match store.query(query.sql, query.columns).await {
        Ok(result) => {
            info!("✅ {} completed - {} rows returned", query.name, result.len());
            Some(result)
        }
        Err(e) => {
            error!("❌ Error in {}: {}", query.name, e);
            None
        }
    }
}

pub fn render_table(result: &QueryResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(result.columns.clone());
    for row in &result.rows {
        table.add_row(row.clone());
    }
    table
}

pub fn print_report(results: &[(&str, Option<QueryResult>)]) {
    println!("\n{}", "=".repeat(60));
    println!("🚀 SQL ANALYSIS");
    println!("{}", "=".repeat(60));

    for (name, result) in results {
        match result {
            Some(r) if !r.is_empty() => {
                println!("\n📊 {}:", name.to_uppercase());
                println!("{}", render_table(r));
            }
            Some(_) => println!("\n📊 {}: 0 rows", name),
            None => println!("\n❌ {}: No data returned", name),
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("✅ SQL ANALYSIS COMPLETE");
    println!("{}", "=".repeat(60));
}
