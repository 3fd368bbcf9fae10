pub mod formatter;

pub use formatter::{CSV_HEADER, ProbeRecord, format_output};
