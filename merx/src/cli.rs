// merx/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "merx")]
#[command(about = "Synthetic e-commerce data: generate, ETL, report, chart", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🎲 Generates the synthetic datasets (customers, products, orders)
    Generate {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Override the configured customer count
        #[arg(long)]
        customers: Option<usize>,

        /// Override the configured product count
        #[arg(long)]
        products: Option<usize>,

        /// Override the configured order count
        #[arg(long)]
        orders: Option<usize>,

        /// Override the configured RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 🚀 Runs the ETL pipeline (Extract -> Transform -> Load)
    Etl {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📊 Runs the five fixed SQL analyses and prints the tables
    Report {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🎨 Renders the four chart dashboards (PNG)
    Charts {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// ⚡ Executes a raw SQL statement (Ad-hoc)
    Query {
        query: String,
        #[arg(long, default_value = "merx.duckdb")]
        db_path: String,
    },

    /// 🔍 Inspects a store table (schema + sample rows)
    Inspect {
        /// Path to the DuckDB database file
        #[arg(long, default_value = "merx.duckdb")]
        db_path: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 🧹 Cleans generated artifacts (datasets, store, charts)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_etl_defaults() -> Result<()> {
        let args = Cli::parse_from(["merx", "etl"]);
        match args.command {
            Commands::Etl { project_dir } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Etl command"),
        }
    }

    #[test]
    fn test_cli_parse_generate_overrides() -> Result<()> {
        let args = Cli::parse_from([
            "merx",
            "generate",
            "--customers",
            "10",
            "--seed",
            "7",
            "--project-dir",
            "/tmp",
        ]);
        match args.command {
            Commands::Generate {
                project_dir,
                customers,
                products,
                orders,
                seed,
            } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp");
                assert_eq!(customers, Some(10));
                assert_eq!(products, None);
                assert_eq!(orders, None);
                assert_eq!(seed, Some(7));
                Ok(())
            }
            _ => bail!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::parse_from(["merx", "inspect", "--table", "orders", "--limit", "10"]);
        match args.command {
            Commands::Inspect {
                table,
                limit,
                db_path,
            } => {
                assert_eq!(table, "orders");
                assert_eq!(limit, 10);
                assert_eq!(db_path, "merx.duckdb");
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }
}
