//! Trace module
//!
//! The ordered `(x, y)` sample sequence shared by extraction, augmentation and
//! rendering, plus its CSV reader and writer.

mod reader;
mod writer;
mod csv_reader;
mod csv_writer;
pub mod types;


pub use reader::TraceReader;
pub use writer::{CsvHeader, TraceWriter};
pub use csv_reader::CsvTraceReader;
pub use csv_writer::CsvTraceWriter;
pub use types::{Sample, Trace};
