//! Input/output boundary: file discovery and report rendering.

pub mod output;
pub mod walker;

pub use output::{write_json_report, OutputFormat, ReportOptions, ReportWriter};
pub use walker::FileWalker;
