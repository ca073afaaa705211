//! Data model shared by the column splitter crates.
//!
//! # Types
//!
//! - [`Dataset`]: the rows of one loaded file (or of a projection of it)
//! - [`Chunk`]: a contiguous, borrowed slice of a dataset's rows
//! - [`OutputFormat`] / [`RowsPerFile`]: export options
//! - [`Deliverable`]: the final artifact handed to a save sink

mod columns;
mod dataset;
mod deliverable;
mod error;
mod format;

pub use columns::{compare_columns, sort_columns};
pub use dataset::{Chunk, Dataset, RecordRef, Row};
pub use deliverable::Deliverable;
pub use error::{ModelError, Result};
pub use format::{OutputFormat, RowsPerFile};
