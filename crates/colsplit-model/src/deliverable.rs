/// The final artifact of an export, ready for a save sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deliverable {
    /// A single rendered text document.
    Document {
        file_name: String,
        mime_type: &'static str,
        bytes: Vec<u8>,
    },
    /// A zip archive bundling one document per chunk.
    Archive {
        file_name: String,
        entries: Vec<String>,
        bytes: Vec<u8>,
    },
}

impl Deliverable {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Document { file_name, .. } | Self::Archive { file_name, .. } => file_name,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Document { bytes, .. } | Self::Archive { bytes, .. } => bytes,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive { .. })
    }

    /// Number of documents carried (1 for a plain document).
    pub fn document_count(&self) -> usize {
        match self {
            Self::Document { .. } => 1,
            Self::Archive { entries, .. } => entries.len(),
        }
    }
}
