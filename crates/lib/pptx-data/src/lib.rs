//! Tabular data loading for chart and analysis tools.
//!
//! Loads CSV files, Excel workbooks and JSON arrays into a uniform
//! [`TableData`] so callers can pick category and value columns without
//! caring where the data came from.

pub mod read;
pub mod table;

pub use read::{DataError, dotted_extension, read_csv, read_excel, read_json, read_table};
pub use table::{CellValue, ColumnKind, TableData};
