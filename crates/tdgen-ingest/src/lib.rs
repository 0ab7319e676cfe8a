//! Master data ingestion.
//!
//! This crate discovers the CSV files of a master data directory and parses
//! each one into a [`MasterTable`](tdgen_model::MasterTable) named after its
//! file stem.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tdgen_ingest::load_master_data;
//!
//! let master = load_master_data(Path::new("master_data"))?;
//! let seats = master.require("seats")?;
//! ```

mod discovery;
mod error;
mod loader;
mod reader;

// === Error Types ===
pub use error::{LoadError, Result};

// === File Discovery ===
pub use discovery::{MasterFile, discover_master_files, table_name};

// === CSV Reading ===
pub use reader::{parse_master_table, read_master_table};

// === Directory Loading ===
pub use loader::{DEFAULT_MASTER_DIR, MASTER_DIR_ENV_VAR, default_master_dir, load_master_data};
