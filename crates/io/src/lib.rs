//! File collaborators around the OptiCast core.
//!
//! - `ingest` - CSV upload to category records
//! - `export` - Four-sheet analysis workbook

pub mod export;
pub mod ingest;

pub use export::{Cell, ExportError, SheetLayout, export_file_name, render_xlsx, workbook_layout};
pub use ingest::{IngestError, parse_categories};
