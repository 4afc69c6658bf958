//! Data pipeline module
//!
//! Turns an uploaded spreadsheet into charts and insights:
//!
//! - `ingest` - upload validation and first-sheet parsing
//! - `schema` - column names and row-0 value types
//! - `table` - the active dataset and its row-limited view
//! - `chart_engine` - per-kind chart series shaping
//! - `insights` - summary statistics and statements
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `InvalidFormat`/`TooLarge`: upload rejected before parsing
//! - `ParseFailure`: unreadable workbook or empty first sheet
//! - `MissingColumn`: a selected axis is not in the dataset
//! - `EmptyView`: nothing to summarize

mod chart_engine;
mod error;
mod ingest;
mod insights;
mod schema;
mod table;

pub use chart_engine::*;
pub use error::*;
pub use ingest::*;
pub use insights::*;
pub use schema::*;
pub use table::*;
