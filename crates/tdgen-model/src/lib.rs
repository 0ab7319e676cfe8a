//! Data model for master-data driven test dataset generation.
//!
//! Master tables are loaded by `tdgen-ingest`, sampled by `tdgen-core` and the
//! resulting [`OutputRecord`]s written by `tdgen-output`.

pub mod error;
pub mod options;
pub mod record;
pub mod seat;
pub mod table;

pub use error::{ConfigurationError, Result};
pub use options::{GenerationOptions, TableNames, UniverseMode};
pub use record::{CustomerAssignment, OutputColumn, OutputRecord, SeatFields};
pub use seat::{GRADE_COLUMN, SEAT_COLUMNS, SeatCombination};
pub use table::{MasterData, MasterRow, MasterTable};
