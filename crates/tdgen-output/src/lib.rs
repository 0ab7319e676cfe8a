//! Output writers for generated datasets.

mod csv_writer;
mod error;

pub use csv_writer::{
    DEFAULT_OUTPUT_PREFIX, output_file_name, write_records, write_records_to, write_timestamped,
};
pub use error::{Result, WriteError};
