//! Export options: output format and rows-per-file limit.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Serialization format of exported documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Json => "application/json",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ModelError::UnknownFormat(other.to_string())),
        }
    }
}

/// Maximum number of rows per output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowsPerFile {
    /// All rows go into a single file.
    #[default]
    Unbounded,
    Limit(NonZeroUsize),
}

impl RowsPerFile {
    /// Interpret free-form user input the way the rows-per-file field does.
    ///
    /// The leading integer is used (`"25 rows"` is 25). Blank input, input
    /// without a leading integer, zero and negative values all mean
    /// [`RowsPerFile::Unbounded`].
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = digits
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(digits.len());
        if negative || end == 0 {
            return Self::Unbounded;
        }
        match digits[..end].parse::<usize>() {
            Ok(count) => Self::from_count(count),
            // Too many digits for usize: larger than any dataset.
            Err(_) => Self::Unbounded,
        }
    }

    /// Zero means unbounded.
    pub fn from_count(count: usize) -> Self {
        NonZeroUsize::new(count).map_or(Self::Unbounded, Self::Limit)
    }

    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Limit(limit) => Some(limit.get()),
        }
    }

    /// Collapse a limit that would not split `total_rows` into `Unbounded`.
    pub fn effective_for(&self, total_rows: usize) -> Self {
        match self {
            Self::Limit(limit) if limit.get() < total_rows => *self,
            _ => Self::Unbounded,
        }
    }
}

impl fmt::Display for RowsPerFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("all rows"),
            Self::Limit(limit) => write!(f, "{limit} rows"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!(" JSON ".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(ModelError::UnknownFormat(_))
        ));
    }

    #[test]
    fn format_serde_is_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Json).expect("serialize format");
        assert_eq!(json, "\"json\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").expect("parse format");
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn lenient_parse_accepts_leading_integer() {
        assert_eq!(RowsPerFile::parse_lenient("10").limit(), Some(10));
        assert_eq!(RowsPerFile::parse_lenient(" 25 rows").limit(), Some(25));
        assert_eq!(RowsPerFile::parse_lenient("+3").limit(), Some(3));
    }

    #[test]
    fn lenient_parse_falls_back_to_unbounded() {
        for input in ["", "   ", "abc", "0", "-5", "-", "99999999999999999999999999"] {
            assert_eq!(
                RowsPerFile::parse_lenient(input),
                RowsPerFile::Unbounded,
                "input {input:?}"
            );
        }
    }

    #[test]
    fn effective_limit() {
        let limit = RowsPerFile::from_count(10);
        assert_eq!(limit.effective_for(11), limit);
        assert_eq!(limit.effective_for(10), RowsPerFile::Unbounded);
        assert_eq!(limit.effective_for(3), RowsPerFile::Unbounded);
        assert_eq!(RowsPerFile::Unbounded.effective_for(100), RowsPerFile::Unbounded);
    }
}
