// merx-core/src/application/charts.rs
//
// USE CASE: Render the four dashboard images from the loaded store.
// No business logic beyond the aggregations the reporting layer
// already runs in SQL; this module exists to drive the plotting
// backend over in-memory tables.

use std::collections::HashMap;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::data::Quartiles;
use plotters::element::{Boxplot, Pie};
use plotters::prelude::*;
use tracing::info;

use crate::domain::catalog::{CATEGORIES, Customer, LOCATIONS, MONTH_FORMAT, Order, Product, SEGMENTS};
use crate::error::MerxError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::store::Store;

type ChartResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub const REVENUE_DASHBOARD_PNG: &str = "revenue_dashboard.png";
pub const CUSTOMER_ANALYTICS_PNG: &str = "customer_analytics.png";
pub const PRODUCT_ANALYTICS_PNG: &str = "product_analytics.png";
pub const BUSINESS_METRICS_PNG: &str = "business_metrics.png";

// Palette carried over from the dashboard mock-ups
const ACCENT_BLUE: RGBColor = RGBColor(46, 134, 171);
const ACCENT_PURPLE: RGBColor = RGBColor(162, 59, 114);
const ACCENT_ORANGE: RGBColor = RGBColor(241, 143, 1);
const ACCENT_GREEN: RGBColor = RGBColor(0, 184, 148);
const ACCENT_RED: RGBColor = RGBColor(255, 107, 107);
const ACCENT_TEAL: RGBColor = RGBColor(78, 205, 196);
const ACCENT_SKY: RGBColor = RGBColor(69, 183, 209);

/// Reload the tables from the store and render all four chart
/// categories into `charts_dir`.
pub async fn render_all(store: &dyn Store, charts_dir: &Path) -> Result<(), MerxError> {
    println!("🎨 Starting chart generation...");

    // Completed orders only; date columns are re-parsed on reload
    let customers = store.fetch_customers().await?;
    let products = store.fetch_products().await?;
    let orders = store.fetch_completed_orders().await?;
    info!(
        customers = customers.len(),
        products = products.len(),
        orders = orders.len(),
        "✅ Data loaded from {}",
        store.engine_name()
    );

    std::fs::create_dir_all(charts_dir)?;

    render_revenue_dashboard(&customers, &orders, &charts_dir.join(REVENUE_DASHBOARD_PNG))
        .map_err(chart_err)?;
    println!("   📊 {REVENUE_DASHBOARD_PNG}");

    render_customer_analytics(&customers, &orders, &charts_dir.join(CUSTOMER_ANALYTICS_PNG))
        .map_err(chart_err)?;
    println!("   👥 {CUSTOMER_ANALYTICS_PNG}");

    render_product_analytics(&products, &charts_dir.join(PRODUCT_ANALYTICS_PNG))
        .map_err(chart_err)?;
    println!("   📦 {PRODUCT_ANALYTICS_PNG}");

    render_business_metrics(&customers, &orders, &charts_dir.join(BUSINESS_METRICS_PNG))
        .map_err(chart_err)?;
    println!("   📈 {BUSINESS_METRICS_PNG}");

    println!("✨ All charts created successfully in {}", charts_dir.display());
    Ok(())
}

fn chart_err(e: Box<dyn std::error::Error + Send + Sync>) -> MerxError {
    MerxError::Infrastructure(InfrastructureError::Chart(e.to_string()))
}

// ---------------------------------------------------------------------
// Dashboards
// ---------------------------------------------------------------------

fn render_revenue_dashboard(
    customers: &[Customer],
    orders: &[Order],
    path: &Path,
) -> ChartResult<()> {
    let root = BitMapBackend::new(path, (1280, 960)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled("E-Commerce Revenue Analytics", ("sans-serif", 36))?;
    let panels = titled.split_evenly((2, 2));

    draw_month_line(
        &panels[0],
        "Monthly Revenue Trend",
        &monthly_revenue(orders),
        "Revenue (£)",
        ACCENT_BLUE,
    )?;

    let clv: Vec<f64> = clv_by_customer(orders).into_values().collect();
    draw_value_histogram(
        &panels[1],
        "Customer Lifetime Value",
        &clv,
        30,
        "Total Spent (£)",
        ACCENT_PURPLE,
        true,
    )?;

    draw_location_revenue(&panels[2], &revenue_by_location(customers, orders))?;

    let per_segment = order_values_by_segment(customers, orders);
    draw_boxplot(
        &panels[3],
        "Order Value by Customer Segment",
        &SEGMENTS,
        &per_segment,
        "Order Value (£)",
    )?;

    root.present()?;
    Ok(())
}

fn render_customer_analytics(
    customers: &[Customer],
    orders: &[Order],
    path: &Path,
) -> ChartResult<()> {
    let root = BitMapBackend::new(path, (1280, 960)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled("Customer Analytics", ("sans-serif", 36))?;
    let panels = titled.split_evenly((2, 2));

    draw_segment_pie(&panels[0], customers)?;

    let signups: Vec<(String, f64)> = monthly_signups(customers)
        .into_iter()
        .map(|(month, count)| (month, count as f64))
        .collect();
    draw_month_line(
        &panels[1],
        "Monthly Customer Acquisition",
        &signups,
        "New Customers",
        ACCENT_GREEN,
    )?;

    draw_orders_per_customer(&panels[2], orders)?;

    draw_value_heatmap(&panels[3], customers, orders)?;

    root.present()?;
    Ok(())
}

fn render_product_analytics(products: &[Product], path: &Path) -> ChartResult<()> {
    let root = BitMapBackend::new(path, (1280, 960)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled("Product Analytics", ("sans-serif", 36))?;
    let panels = titled.split_evenly((2, 2));

    draw_category_performance(&panels[0], &category_stats(products))?;

    let prices: Vec<f64> = products.iter().map(|p| p.price).collect();
    draw_value_histogram(
        &panels[1],
        "Product Price Distribution",
        &prices,
        20,
        "Price (£)",
        ACCENT_GREEN,
        false,
    )?;

    let margins_by_category: Vec<Vec<f64>> = CATEGORIES
        .iter()
        .map(|cat| {
            products
                .iter()
                .filter(|p| p.category == *cat)
                .map(|p| p.profit_margin)
                .collect()
        })
        .collect();
    draw_boxplot(
        &panels[2],
        "Profit Margin by Category",
        &CATEGORIES,
        &margins_by_category,
        "Profit Margin (%)",
    )?;

    draw_price_margin_scatter(&panels[3], products)?;

    root.present()?;
    Ok(())
}

fn render_business_metrics(
    customers: &[Customer],
    orders: &[Order],
    path: &Path,
) -> ChartResult<()> {
    let total_revenue: f64 = orders.iter().map(|o| o.total_amount).sum();
    let total_orders = orders.len();
    let total_customers = customers.len();
    let avg_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };
    let clv: Vec<f64> = clv_by_customer(orders).into_values().collect();
    let avg_clv = mean(&clv);
    let revenue_per_customer = if total_customers > 0 {
        total_revenue / total_customers as f64
    } else {
        0.0
    };

    let metrics = [
        ("Total Revenue", format!("£{total_revenue:.2}"), ACCENT_RED),
        ("Total Orders", format!("{total_orders}"), ACCENT_TEAL),
        ("Total Customers", format!("{total_customers}"), ACCENT_SKY),
        ("Avg Order Value", format!("£{avg_order_value:.2}"), ACCENT_GREEN),
        ("Avg Customer LTV", format!("£{avg_clv:.2}"), ACCENT_ORANGE),
        (
            "Revenue per Customer",
            format!("£{revenue_per_customer:.2}"),
            ACCENT_PURPLE,
        ),
    ];

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled("Key Business Metrics", ("sans-serif", 40))?;

    for (i, (label, value, color)) in metrics.iter().enumerate() {
        let y = 60 + i as i32 * 105;
        titled.draw(&Rectangle::new(
            [(212, y), (812, y + 85)],
            color.mix(0.7).filled(),
        ))?;
        titled.draw(&Text::new(
            format!("{label}: {value}"),
            (250, y + 30),
            ("sans-serif", 28),
        ))?;
    }

    root.present()?;
    Ok(())
}

// ---------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------

/// Line over "YYYY-MM" buckets. Shared by the revenue trend and the
/// acquisition trend.
fn draw_month_line(
    area: &Panel<'_>,
    title: &str,
    series: &[(String, f64)],
    y_desc: &str,
    color: RGBColor,
) -> ChartResult<()> {
    let y_max = series.iter().map(|(_, v)| *v).fold(0.0, f64::max).max(1.0) * 1.1;
    let x_max = series.len().max(1) as i32;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(series.len().max(2))
        .x_label_formatter(&|i| {
            series
                .get(*i as usize)
                .map(|(month, _)| month.clone())
                .unwrap_or_default()
        })
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.iter().enumerate().map(|(i, (_, v))| (i as i32, *v)),
        &color,
    ))?;
    chart.draw_series(
        series
            .iter()
            .enumerate()
            .map(|(i, (_, v))| Circle::new((i as i32, *v), 3, color.filled())),
    )?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_value_histogram(
    area: &Panel<'_>,
    title: &str,
    values: &[f64],
    bins: usize,
    x_desc: &str,
    color: RGBColor,
    with_median: bool,
) -> ChartResult<()> {
    let bars = histogram(values, bins);
    let x_lo = bars.first().map(|((lo, _), _)| *lo).unwrap_or(0.0);
    let x_hi = bars.last().map(|((_, hi), _)| *hi).unwrap_or(1.0);
    let y_max = bars.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_max)?;

    chart.configure_mesh().x_desc(x_desc).y_desc("Count").draw()?;

    chart.draw_series(bars.iter().map(|((lo, hi), count)| {
        Rectangle::new([(*lo, 0.0), (*hi, *count as f64)], color.mix(0.7).filled())
    }))?;

    if !values.is_empty() {
        let m = mean(values);
        chart
            .draw_series(LineSeries::new(vec![(m, 0.0), (m, y_max)], &RED))?
            .label(format!("Mean: {m:.2}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        if with_median {
            let md = median(values);
            chart
                .draw_series(LineSeries::new(vec![(md, 0.0), (md, y_max)], &ACCENT_ORANGE))?
                .label(format!("Median: {md:.2}"))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &ACCENT_ORANGE));
        }

        chart.configure_series_labels().border_style(&BLACK).draw()?;
    }

    Ok(())
}

fn draw_location_revenue(area: &Panel<'_>, rows: &[(String, f64)]) -> ChartResult<()> {
    let x_max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max).max(1.0) * 1.15;
    let n = rows.len().max(1) as i32;

    let mut chart = ChartBuilder::on(area)
        .caption("Revenue by Location", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..x_max, 0..n)?;

    chart
        .configure_mesh()
        .y_labels(rows.len().max(2))
        .y_label_formatter(&|i| {
            rows.get(*i as usize)
                .map(|(location, _)| location.clone())
                .unwrap_or_default()
        })
        .x_desc("Total Revenue (£)")
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(i, (_, v))| {
        Rectangle::new([(0.0, i as i32), (*v, i as i32 + 1)], ACCENT_ORANGE.filled())
    }))?;
    chart.draw_series(rows.iter().enumerate().map(|(i, (_, v))| {
        Text::new(format!("£{v:.0}"), (*v, i as i32), ("sans-serif", 14))
    }))?;

    Ok(())
}

fn draw_boxplot(
    area: &Panel<'_>,
    title: &str,
    labels: &[&str],
    groups: &[Vec<f64>],
    y_desc: &str,
) -> ChartResult<()> {
    let y_max = groups
        .iter()
        .flatten()
        .copied()
        .fold(0.0, f64::max)
        .max(1.0) as f32
        * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len() as i32).into_segmented(), 0f32..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(ToString::to_string)
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(
        groups
            .iter()
            .enumerate()
            .filter(|(_, values)| !values.is_empty())
            .map(|(i, values)| {
                let quartiles = Quartiles::new(values);
                Boxplot::new_vertical(SegmentValue::CenterOf(i as i32), &quartiles)
            }),
    )?;

    Ok(())
}

fn draw_segment_pie(area: &Panel<'_>, customers: &[Customer]) -> ChartResult<()> {
    let counts: Vec<f64> = SEGMENTS
        .iter()
        .map(|s| customers.iter().filter(|c| c.customer_segment == *s).count() as f64)
        .collect();
    let total: f64 = counts.iter().sum();

    let titled = area.titled("Customer Segmentation", ("sans-serif", 24))?;
    if total == 0.0 {
        return Ok(());
    }

    let (w, h) = titled.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = f64::from(w.min(h)) * 0.35;
    let colors = [ACCENT_RED, ACCENT_TEAL, ACCENT_SKY];
    let labels: Vec<String> = SEGMENTS
        .iter()
        .zip(&counts)
        .map(|(s, c)| format!("{} ({:.1}%)", s, c / total * 100.0))
        .collect();

    let mut pie = Pie::new(&center, &radius, &counts, &colors, &labels);
    pie.label_style(("sans-serif", 18));
    titled.draw(&pie)?;

    Ok(())
}

fn draw_orders_per_customer(area: &Panel<'_>, orders: &[Order]) -> ChartResult<()> {
    let per_customer = orders_per_customer(orders);
    let mut freq: HashMap<usize, usize> = HashMap::new();
    for count in per_customer.values() {
        *freq.entry(*count).or_default() += 1;
    }

    let x_max = freq.keys().max().copied().unwrap_or(1) as i32 + 1;
    let y_max = freq.values().max().copied().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Orders per Customer", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max + 1, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Number of Orders")
        .y_desc("Number of Customers")
        .draw()?;

    chart.draw_series(freq.iter().map(|(orders, customers)| {
        Rectangle::new(
            [(*orders as i32, 0.0), (*orders as i32 + 1, *customers as f64)],
            RGBColor(255, 234, 167).filled(),
        )
    }))?;

    Ok(())
}

fn draw_value_heatmap(
    area: &Panel<'_>,
    customers: &[Customer],
    orders: &[Order],
) -> ChartResult<()> {
    let matrix = avg_customer_value_matrix(customers, orders);
    let vmax = matrix
        .iter()
        .flatten()
        .copied()
        .fold(0.0, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption("Avg Customer Value (Location x Segment)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..SEGMENTS.len() as f64, 0f64..LOCATIONS.len() as f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(SEGMENTS.len())
        .y_labels(LOCATIONS.len())
        .x_label_formatter(&|x| {
            SEGMENTS
                .get(*x as usize)
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| {
            LOCATIONS
                .get(*y as usize)
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .draw()?;

    for (li, row) in matrix.iter().enumerate() {
        for (si, value) in row.iter().enumerate() {
            let t = value / vmax;
            let shade = RGBColor(255, (220.0 * (1.0 - t)) as u8, (160.0 * (1.0 - t)) as u8);
            chart.draw_series(std::iter::once(Rectangle::new(
                [
                    (si as f64, li as f64),
                    (si as f64 + 1.0, li as f64 + 1.0),
                ],
                shade.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("{value:.0}"),
                (si as f64 + 0.35, li as f64 + 0.55),
                ("sans-serif", 16),
            )))?;
        }
    }

    Ok(())
}

fn draw_category_performance(
    area: &Panel<'_>,
    stats: &[(String, f64, f64)],
) -> ChartResult<()> {
    let y_max = stats
        .iter()
        .map(|(_, price, margin)| price.max(*margin))
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;
    let n = stats.len().max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("Category Performance", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(stats.len().max(2))
        .x_label_formatter(&|x| {
            stats
                .get(*x as usize)
                .map(|(cat, _, _)| cat.clone())
                .unwrap_or_default()
        })
        .draw()?;

    chart
        .draw_series(stats.iter().enumerate().map(|(i, (_, price, _))| {
            Rectangle::new(
                [(i as f64 + 0.1, 0.0), (i as f64 + 0.45, *price)],
                ACCENT_SKY.filled(),
            )
        }))?
        .label("Avg Price")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], ACCENT_SKY.filled()));

    chart
        .draw_series(stats.iter().enumerate().map(|(i, (_, _, margin))| {
            Rectangle::new(
                [(i as f64 + 0.55, 0.0), (i as f64 + 0.9, *margin)],
                ACCENT_PURPLE.filled(),
            )
        }))?
        .label("Avg Margin %")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], ACCENT_PURPLE.filled()));

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    Ok(())
}

fn draw_price_margin_scatter(area: &Panel<'_>, products: &[Product]) -> ChartResult<()> {
    let x_max = products.iter().map(|p| p.price).fold(0.0, f64::max).max(1.0) * 1.05;
    let y_max = products
        .iter()
        .map(|p| p.profit_margin)
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Price vs Profit Margin", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Price (£)")
        .y_desc("Profit Margin (%)")
        .draw()?;

    for (i, category) in CATEGORIES.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.8);
        chart
            .draw_series(
                products
                    .iter()
                    .filter(|p| p.category == *category)
                    .map(|p| Circle::new((p.price, p.profit_margin), 4, color.filled())),
            )?
            .label(*category)
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    Ok(())
}

// ---------------------------------------------------------------------
// Aggregations (pure, shared by the panels)
// ---------------------------------------------------------------------

fn monthly_revenue(orders: &[Order]) -> Vec<(String, f64)> {
    let mut by_month: std::collections::BTreeMap<String, f64> = Default::default();
    for order in orders {
        *by_month.entry(order.order_month.clone()).or_default() += order.total_amount;
    }
    by_month.into_iter().collect()
}

fn monthly_signups(customers: &[Customer]) -> Vec<(String, usize)> {
    let mut by_month: std::collections::BTreeMap<String, usize> = Default::default();
    for customer in customers {
        let month = customer.signup_date.format(MONTH_FORMAT).to_string();
        *by_month.entry(month).or_default() += 1;
    }
    by_month.into_iter().collect()
}

fn clv_by_customer(orders: &[Order]) -> HashMap<u32, f64> {
    let mut totals: HashMap<u32, f64> = HashMap::new();
    for order in orders {
        *totals.entry(order.customer_id).or_default() += order.total_amount;
    }
    totals
}

fn orders_per_customer(orders: &[Order]) -> HashMap<u32, usize> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for order in orders {
        *counts.entry(order.customer_id).or_default() += 1;
    }
    counts
}

/// Total completed revenue per location, every customer's location
/// included even at zero, sorted ascending for the horizontal bars.
fn revenue_by_location(customers: &[Customer], orders: &[Order]) -> Vec<(String, f64)> {
    let mut by_location: HashMap<&str, f64> = HashMap::new();
    for customer in customers {
        by_location.entry(customer.location.as_str()).or_insert(0.0);
    }

    let location_of: HashMap<u32, &str> = customers
        .iter()
        .map(|c| (c.customer_id, c.location.as_str()))
        .collect();
    for order in orders {
        if let Some(location) = location_of.get(&order.customer_id) {
            *by_location.entry(location).or_insert(0.0) += order.total_amount;
        }
    }

    let mut rows: Vec<(String, f64)> = by_location
        .into_iter()
        .map(|(location, total)| (location.to_string(), total))
        .collect();
    rows.sort_by(|a, b| a.1.total_cmp(&b.1));
    rows
}

/// Order totals grouped by the ordering customer's segment, in
/// SEGMENTS order.
fn order_values_by_segment(customers: &[Customer], orders: &[Order]) -> Vec<Vec<f64>> {
    let segment_of: HashMap<u32, &str> = customers
        .iter()
        .map(|c| (c.customer_id, c.customer_segment.as_str()))
        .collect();

    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); SEGMENTS.len()];
    for order in orders {
        if let Some(segment) = segment_of.get(&order.customer_id)
            && let Some(idx) = SEGMENTS.iter().position(|s| s == segment)
        {
            groups[idx].push(order.total_amount);
        }
    }
    groups
}

/// Mean customer lifetime value per (location, segment) cell; customers
/// with no completed orders count as zero.
fn avg_customer_value_matrix(customers: &[Customer], orders: &[Order]) -> Vec<Vec<f64>> {
    let clv = clv_by_customer(orders);

    LOCATIONS
        .iter()
        .map(|location| {
            SEGMENTS
                .iter()
                .map(|segment| {
                    let values: Vec<f64> = customers
                        .iter()
                        .filter(|c| c.location == *location && c.customer_segment == *segment)
                        .map(|c| clv.get(&c.customer_id).copied().unwrap_or(0.0))
                        .collect();
                    mean(&values)
                })
                .collect()
        })
        .collect()
}

fn category_stats(products: &[Product]) -> Vec<(String, f64, f64)> {
    CATEGORIES
        .iter()
        .filter_map(|category| {
            let items: Vec<&Product> = products
                .iter()
                .filter(|p| p.category == *category)
                .collect();
            if items.is_empty() {
                return None;
            }
            let n = items.len() as f64;
            let avg_price = items.iter().map(|p| p.price).sum::<f64>() / n;
            let avg_margin = items.iter().map(|p| p.profit_margin).sum::<f64>() / n;
            Some((category.to_string(), avg_price, avg_margin))
        })
        .collect()
}

fn histogram(values: &[f64], bins: usize) -> Vec<((f64, f64), usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = ((hi - lo) / bins as f64).max(0.01);

    let mut counts = vec![0usize; bins];
    for value in values {
        let idx = (((value - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = lo + i as f64 * width;
            ((start, start + width), count)
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn customer(id: u32, location: &str, segment: &str) -> Customer {
        Customer {
            customer_id: id,
            name: format!("Customer_{id}"),
            email: format!("user{id}@email.com"),
            signup_date: NaiveDate::from_ymd_opt(2023, 1, id % 27 + 1).unwrap(),
            location: location.into(),
            age: 30,
            customer_segment: segment.into(),
            days_since_signup: 10,
        }
    }

    fn order(id: u32, customer_id: u32, month: &str, total: f64) -> Order {
        Order {
            order_id: id,
            customer_id,
            order_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            total_amount: total,
            status: "Completed".into(),
            order_month: month.into(),
            order_year: 2023,
        }
    }

    #[test]
    fn test_monthly_revenue_sorted_and_summed() {
        let orders = vec![
            order(1, 1, "2023-03", 10.0),
            order(2, 1, "2023-01", 5.0),
            order(3, 2, "2023-03", 2.5),
        ];
        let monthly = monthly_revenue(&orders);
        assert_eq!(monthly, vec![
            ("2023-01".to_string(), 5.0),
            ("2023-03".to_string(), 12.5),
        ]);
    }

    #[test]
    fn test_revenue_by_location_keeps_zero_locations() {
        let customers = vec![
            customer(1, "London", "Premium"),
            customer(2, "Edinburgh", "Basic"),
        ];
        let orders = vec![order(1, 1, "2023-01", 40.0)];

        let rows = revenue_by_location(&customers, &orders);
        assert_eq!(rows, vec![
            ("Edinburgh".to_string(), 0.0),
            ("London".to_string(), 40.0),
        ]);
    }

    #[test]
    fn test_order_values_grouped_by_segment() {
        let customers = vec![
            customer(1, "London", "Premium"),
            customer(2, "London", "Basic"),
        ];
        let orders = vec![
            order(1, 1, "2023-01", 10.0),
            order(2, 1, "2023-02", 20.0),
            order(3, 2, "2023-02", 7.0),
        ];

        let groups = order_values_by_segment(&customers, &orders);
        assert_eq!(groups[0], vec![10.0, 20.0]); // Premium
        assert!(groups[1].is_empty()); // Standard
        assert_eq!(groups[2], vec![7.0]); // Basic
    }

    #[test]
    fn test_histogram_covers_all_values() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 10.0];
        let bars = histogram(&values, 3);

        assert_eq!(bars.len(), 3);
        let total: usize = bars.iter().map(|(_, c)| *c).sum();
        assert_eq!(total, values.len());
    }

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_category_stats_averages() {
        let products = vec![
            Product {
                product_id: 1,
                name: "Books_Product_1".into(),
                category: "Books".into(),
                price: 10.0,
                cost: 6.0,
                stock_quantity: 1,
                profit_margin: 40.0,
            },
            Product {
                product_id: 2,
                name: "Books_Product_2".into(),
                category: "Books".into(),
                price: 30.0,
                cost: 18.0,
                stock_quantity: 1,
                profit_margin: 40.0,
            },
        ];

        let stats = category_stats(&products);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].0, "Books");
        assert_eq!(stats[0].1, 20.0);
        assert_eq!(stats[0].2, 40.0);
    }

    #[test]
    fn test_avg_customer_value_matrix_counts_zero_spenders() {
        let customers = vec![
            customer(1, "London", "Premium"),
            customer(2, "London", "Premium"),
        ];
        let orders = vec![order(1, 1, "2023-01", 100.0)];

        let matrix = avg_customer_value_matrix(&customers, &orders);
        let london = LOCATIONS.iter().position(|l| *l == "London").unwrap();
        let premium = SEGMENTS.iter().position(|s| *s == "Premium").unwrap();
        // (100 + 0) / 2 customers
        assert_eq!(matrix[london][premium], 50.0);
    }
}
