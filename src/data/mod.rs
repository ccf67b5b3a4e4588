//! Data module - CSV loading and the typed salary table

mod loader;
mod schema;
mod table;

pub use loader::{DataLoadError, DataLoader};
pub use schema::{CellValue, ColumnId};
pub use table::{MalformedReason, MalformedRecordError, Record, SchemaError, Table};
