use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, SelectionError>;
