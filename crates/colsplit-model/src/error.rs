use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown output format '{0}' (expected csv or json)")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
