//! Output generation for column exports.
//!
//! - **Render**: one chunk to a CSV or JSON document
//! - **Package**: one document, or a zip archive of `<base>_partN` documents
//! - **Deliver**: hand the result to a save sink or the clipboard
//!
//! [`export_selection`] and [`copy_selection`] run the whole chain for a
//! user action and refuse to do anything when no column is selected.

mod action;
mod error;
mod naming;
mod package;
mod render;
mod sink;

pub use action::{
    CopyOutcome, CopyRequest, ExportOutcome, ExportRequest, copy_selection, export_selection,
};
pub use error::{OutputError, Result};
pub use naming::ExportNaming;
pub use package::package;
pub use render::{CsvStyle, render};
pub use sink::{ClipboardSink, DirectorySink, MemoryClipboard, SaveSink, SystemClipboard};
