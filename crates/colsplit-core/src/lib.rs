//! Core transformation pipeline of the column splitter.
//!
//! The pipeline is a chain of pure functions over an immutable
//! [`Dataset`](colsplit_model::Dataset):
//!
//! 1. **Select**: [`ColumnSelection`] holds the only mutable state (checked
//!    columns and the search filter)
//! 2. **Project**: [`project`] restricts every record to the selected columns
//! 3. **Chunk**: [`chunk`] splits the projection into row-bounded parts
//!
//! Rendering and packaging live in `colsplit-output`.

mod chunk;
mod error;
mod projection;
mod selection;

pub use chunk::chunk;
pub use error::{Result, SelectionError};
pub use projection::project;
pub use selection::{ColumnSelection, matches_search};
