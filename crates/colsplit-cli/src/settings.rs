//! Persisted defaults for export options.
//!
//! Settings are stored as TOML in the platform configuration folder:
//! - macOS: ~/Library/Application Support/io.colsplit.colsplit/
//! - Windows: %APPDATA%/colsplit/colsplit/config/
//! - Linux: ~/.config/colsplit/
//!
//! Command line flags always win over settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use colsplit_model::{OutputFormat, RowsPerFile};
use colsplit_output::CsvStyle;

const APP_QUALIFIER: &str = "io";
const APP_ORG: &str = "colsplit";
const APP_NAME: &str = "colsplit";
const CONFIG_FILENAME: &str = "settings.toml";

/// User settings (persisted to disk as TOML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
}

/// Defaults for `export` and `copy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: OutputFormat,
    /// 0 keeps every row in one file.
    pub rows_per_file: usize,
    /// Where exports are saved; the working directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub csv: CsvStyle,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            rows_per_file: 0,
            output_dir: None,
            csv: CsvStyle::default(),
        }
    }
}

impl ExportSettings {
    pub fn rows_per_file(&self) -> RowsPerFile {
        RowsPerFile::from_count(self.rows_per_file)
    }
}

/// Path of the settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit` or the default location.
///
/// Returns the settings and the path they were looked up at. A missing,
/// unreadable or invalid file yields defaults.
pub fn load_settings(explicit: Option<&Path>) -> (Settings, Option<PathBuf>) {
    let path = explicit.map(Path::to_path_buf).or_else(settings_path);
    let settings = match &path {
        Some(path) => load_settings_from(path),
        None => {
            tracing::warn!("could not determine settings path, using defaults");
            Settings::default()
        }
    };
    (settings, path)
}

/// Load settings from one file, falling back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "invalid settings file, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "unreadable settings file, using defaults");
            Settings::default()
        }
    }
}

/// Write settings, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let content = to_toml(settings)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}

pub fn to_toml(settings: &Settings) -> Result<String> {
    toml::to_string_pretty(settings).context("serialize settings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_exists() {
        assert!(settings_path().is_some());
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);
        let mut settings = Settings::default();
        settings.export.format = OutputFormat::Json;
        settings.export.rows_per_file = 500;
        settings.export.output_dir = Some(PathBuf::from("/tmp/exports"));
        settings.export.csv.byte_order_mark = false;

        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[export]\nrows_per_file = 25\n").unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.export.rows_per_file().limit(), Some(25));
        assert_eq!(settings.export.format, OutputFormat::Csv);
        assert!(settings.export.csv.quote_all);
    }

    #[test]
    fn test_invalid_or_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        assert_eq!(load_settings_from(&path), Settings::default());

        fs::write(&path, "export = [").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[export]\nformat = \"json\"\n").unwrap();

        let (settings, used) = load_settings(Some(&path));
        assert_eq!(used.as_deref(), Some(path.as_path()));
        assert_eq!(settings.export.format, OutputFormat::Json);
    }
}
