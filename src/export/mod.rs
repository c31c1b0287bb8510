//! Export of journal data

pub mod csv;

pub use self::csv::{
    distribution_file_name, entries_file_name, export_distribution_to_file, export_entries_to_file,
    ExportError,
};
