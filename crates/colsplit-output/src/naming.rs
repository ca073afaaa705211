//! File names of exported documents and archives.

use colsplit_model::OutputFormat;

/// Base name shared by every file of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNaming {
    base: String,
}

impl ExportNaming {
    pub const DEFAULT_BASE: &'static str = "export";
    /// Prefix of names derived from the source file, so an export never
    /// shares its name with the file it came from.
    pub const SOURCE_PREFIX: &'static str = "selected_";

    /// Blank names fall back to [`Self::DEFAULT_BASE`].
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let trimmed = base.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self {
                base: trimmed.to_string(),
            }
        }
    }

    /// An explicit name if it is not blank, else `selected_<stem>` of the
    /// source file, else [`Self::DEFAULT_BASE`].
    pub fn resolve(explicit: Option<&str>, source_stem: Option<&str>) -> Self {
        if let Some(name) = explicit.filter(|name| !name.trim().is_empty()) {
            return Self::new(name);
        }
        source_stem
            .map(str::trim)
            .filter(|stem| !stem.is_empty())
            .map_or_else(Self::default, |stem| {
                Self::new(format!("{}{stem}", Self::SOURCE_PREFIX))
            })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `<base>.<ext>`
    pub fn document_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.base, format.extension())
    }

    /// `<base>_part<N>.<ext>`, with `part` counted from 1.
    pub fn part_name(&self, part: usize, format: OutputFormat) -> String {
        format!("{}_part{part}.{}", self.base, format.extension())
    }

    /// `<base>_split.zip`
    pub fn archive_name(&self) -> String {
        format!("{}_split.zip", self.base)
    }
}

impl Default for ExportNaming {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE.to_string(),
        }
    }
}
