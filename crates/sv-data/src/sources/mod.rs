//! Data sources

pub mod sheet_source;

pub use sheet_source::SheetTable;
