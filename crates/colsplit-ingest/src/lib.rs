//! Data ingestion for the column splitter.
//!
//! This crate turns a delimited text file with a header row into a
//! [`Dataset`](colsplit_model::Dataset) plus the sorted working column list.
//!
//! # Features
//!
//! - **Encoding detection**: UTF-8 (with or without BOM), UTF-16 via BOM, and a
//!   Windows-1252 fallback for legacy spreadsheet exports
//! - **Delimiter detection**: comma, tab, pipe or semicolon
//! - **Permissive rows**: ragged rows never fail; missing cells become absent
//! - **Header-only files**: columns are known even with zero data rows
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use colsplit_ingest::{IngestOptions, read_csv_file};
//!
//! let loaded = read_csv_file(Path::new("contacts.csv"), &IngestOptions::default())?;
//! println!("{} rows, columns: {:?}", loaded.total_rows(), loaded.columns);
//! ```

mod decode;
mod delimiter;
mod error;
mod loaded;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use decode::{DetectedEncoding, decode_bytes};
pub use delimiter::{CANDIDATE_DELIMITERS, detect_delimiter};
pub use reader::{
    IngestOptions, MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_csv_bytes, read_csv_file,
    read_csv_str,
};

// === Loaded Data ===
pub use loaded::LoadedFile;
