// ── Editor configuration ──────────────────────────────────────────────────────
//
// Reads and writes `config.json`.  Every field has a default, so a missing
// file, an empty object, or a file from an older version all load.

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::error::{JotterError, Result};

// ── Format version ────────────────────────────────────────────────────────────

pub const CONFIG_VERSION: u32 = 1;

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Root of the JSON configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub version: u32,
    /// Base name of unsaved buffers: `<stem>.<ext>`, `<stem>1.<ext>`, …
    pub unnamed_stem: String,
    /// Extension (without dot) of unsaved buffers.
    pub extension: String,
    pub file_filter: FileFilter,
    pub toolchain: Toolchain,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            unnamed_stem: "unnamed_file".to_owned(),
            extension: "java".to_owned(),
            file_filter: FileFilter::default(),
            toolchain: Toolchain::default(),
        }
    }
}

/// The file-type filter shown in open/save dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFilter {
    pub description: String,
    pub pattern: String,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            description: "Java Files".to_owned(),
            pattern: "*.java".to_owned(),
        }
    }
}

/// Programs used by the compile-then-run pipeline.
///
/// Compile: `<compiler> <compiler_args…> <source>` in the source's folder.
/// Run: `<runner> <runner_args…> <classpath_flag> <folder> <unit>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub compiler: String,
    pub compiler_args: Vec<String>,
    pub runner: String,
    pub runner_args: Vec<String>,
    pub classpath_flag: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compiler: "javac".to_owned(),
            compiler_args: Vec::new(),
            runner: "java".to_owned(),
            runner_args: Vec::new(),
            classpath_flag: "-cp".to_owned(),
        }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the default configuration path.
///
/// Checked in order: `$JOTTER_CONFIG`, `$XDG_CONFIG_HOME/jotter/config.json`,
/// `$HOME/.config/jotter/config.json`, `%APPDATA%\jotter\config.json`.
/// Returns `None` if none of those variables is set.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("JOTTER_CONFIG") {
        return Some(PathBuf::from(explicit));
    }
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .or_else(|| std::env::var_os("APPDATA").map(PathBuf::from))?;
    Some(base.join("jotter").join("config.json"))
}

// ── Load / save ───────────────────────────────────────────────────────────────

impl EditorConfig {
    /// Read and parse the configuration at `path`.
    ///
    /// A missing file yields the defaults.  A file that cannot be parsed, or
    /// that carries an unrecognised version, is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(JotterError::io(path, e)),
        };
        let config: Self = serde_json::from_slice(&data).map_err(|e| JotterError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if config.version != CONFIG_VERSION {
            return Err(JotterError::Config {
                path: path.to_path_buf(),
                message: format!("unsupported version {}", config.version),
            });
        }
        Ok(config)
    }

    /// Load from [`config_path`], or the defaults when no location is known.
    pub fn load_default() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Write the configuration to `path` as pretty JSON, creating the parent
    /// directory if it does not exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| JotterError::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| JotterError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| JotterError::io(path, e))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_java_toolchain() {
        let c = EditorConfig::default();
        assert_eq!(c.version, CONFIG_VERSION);
        assert_eq!(c.toolchain.compiler, "javac");
        assert_eq!(c.toolchain.runner, "java");
        assert_eq!(c.toolchain.classpath_flag, "-cp");
        assert_eq!(c.file_filter.pattern, "*.java");
    }

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");
        let mut c = EditorConfig::default();
        c.toolchain.runner_args = vec!["-Xmx64m".to_owned()];
        c.save(&path).expect("save");
        assert_eq!(EditorConfig::load(&path).expect("load"), c);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let c = EditorConfig::load(&dir.path().join("absent.json")).expect("load");
        assert_eq!(c, EditorConfig::default());
    }

    /// Partial files fill the gaps with defaults.
    #[test]
    fn partial_file_uses_defaults_for_missing_fields() {
        let json = r#"{"toolchain":{"compiler":"ecj"}}"#;
        let c: EditorConfig = serde_json::from_str(json).expect("deserialize partial");
        assert_eq!(c.version, CONFIG_VERSION);
        assert_eq!(c.toolchain.compiler, "ecj");
        assert_eq!(c.toolchain.runner, "java");
        assert_eq!(c.unnamed_stem, "unnamed_file");
    }

    #[test]
    fn wrong_version_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"version":99}"#).expect("write");
        let err = EditorConfig::load(&path).expect_err("version 99");
        assert!(matches!(err, JotterError::Config { .. }));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            EditorConfig::load(&path),
            Err(JotterError::Config { .. })
        ));
    }
}
