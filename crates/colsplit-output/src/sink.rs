//! Destinations for finished exports.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// Receives a finished file under a suggested name.
pub trait SaveSink {
    /// Store `bytes` as `file_name` and return where they ended up.
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Receives text destined for the system clipboard.
pub trait ClipboardSink {
    /// Replace the clipboard content. On failure the previous content must
    /// stay in place.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Writes files into a directory, creating it when needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
    /// Files that are never written to, whatever `overwrite` says.
    protected: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
            protected: Vec::new(),
        }
    }

    /// Replace existing files instead of failing with
    /// [`OutputError::AlreadyExists`].
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Fail with [`OutputError::ReplacesSource`] instead of writing to `path`.
    #[must_use]
    pub fn protecting(mut self, path: impl Into<PathBuf>) -> Self {
        self.protected.push(path.into());
        self
    }

    fn is_protected(&self, target: &Path) -> bool {
        // A target that does not exist yet cannot be one of the inputs.
        let Ok(target) = fs::canonicalize(target) else {
            return false;
        };
        self.protected
            .iter()
            .any(|path| fs::canonicalize(path).is_ok_and(|path| path == target))
    }
}

impl SaveSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|err| OutputError::io(&self.dir, err))?;
        let path = self.dir.join(file_name);
        if self.is_protected(&path) {
            return Err(OutputError::ReplacesSource(path));
        }

        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut file = match options.open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(OutputError::AlreadyExists(path));
            }
            Err(err) => return Err(OutputError::io(&path, err)),
        };
        file.write_all(bytes)
            .and_then(|()| file.flush())
            .map_err(|err| OutputError::io(&path, err))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved export");
        Ok(path)
    }
}

/// The desktop clipboard, opened on the first write.
///
/// On Linux the copied text is served by this process, so a write blocks
/// until another application takes the clipboard over.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`ClipboardSink::write_text`] blocks until the text is
    /// replaced by someone else.
    pub fn holds_until_replaced() -> bool {
        cfg!(target_os = "linux")
    }

    fn open(&mut self) -> Result<&mut arboard::Clipboard> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(clipboard_error)?,
        };
        Ok(self.clipboard.insert(clipboard))
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let clipboard = self.open()?;
        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;

            tracing::debug!("serving clipboard text until it is replaced");
            clipboard.set().wait().text(text).map_err(clipboard_error)?;
        }
        #[cfg(not(target_os = "linux"))]
        clipboard.set_text(text).map_err(clipboard_error)?;
        tracing::debug!(chars = text.chars().count(), "wrote clipboard text");
        Ok(())
    }
}

fn clipboard_error(err: arboard::Error) -> OutputError {
    OutputError::Clipboard(err.to_string())
}

/// In-process clipboard, optionally rejecting every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that fails every write, like a host denying permission.
    pub fn rejecting() -> Self {
        Self {
            contents: None,
            reject: true,
        }
    }

    #[must_use]
    pub fn with_contents(mut self, text: impl Into<String>) -> Self {
        self.contents = Some(text.into());
        self
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.reject {
            return Err(OutputError::Clipboard("write not permitted".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
