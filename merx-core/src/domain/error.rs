// merx-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid date '{value}' in column '{column}'")]
    #[diagnostic(
        code(merx::domain::date),
        help("Dates must be ISO-8601 (YYYY-MM-DD).")
    )]
    DateParse { column: String, value: String },

    #[error("Catalog '{0}' is empty, cannot generate orders")]
    #[diagnostic(code(merx::domain::empty_catalog))]
    EmptyCatalog(String),

    #[error("Table '{0}' has no rows after extraction")]
    #[diagnostic(code(merx::domain::empty_table))]
    EmptyTable(String),

    #[error("Schema Error: {0}")]
    #[diagnostic(code(merx::domain::schema))]
    SchemaError(String),
}
