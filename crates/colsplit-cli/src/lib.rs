//! Library side of the `colsplit` command line tool.

pub mod logging;
pub mod pipeline;
pub mod settings;
