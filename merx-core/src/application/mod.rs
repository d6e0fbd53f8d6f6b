// merx-core/src/application/mod.rs

pub mod charts;
pub mod clean;
pub mod engine;
pub mod extract;
pub mod generate;
pub mod load;
pub mod pipeline;
pub mod report;
pub mod transform;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do:
// `use merx_core::application::{run_generate, run_etl, run_report};`
// without knowing the internal file layout.

pub use charts::render_all;
pub use clean::clean_project;
pub use engine::execute_query;
pub use generate::run_generate;
pub use pipeline::run_etl;
pub use report::{print_report, run_report};
