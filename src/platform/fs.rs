// ── File collaborator ─────────────────────────────────────────────────────────
//
// The engine never touches the file system directly; it goes through
// `FileIo`.  `DiskFileIo` is the real implementation, `MemoryFileIo` keeps
// files in a map for hosts without a disk (and for tests).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{JotterError, Result};

/// Read and write whole files as text.
pub trait FileIo {
    /// Return the full text of `path`.
    fn load(&mut self, path: &Path) -> Result<String>;

    /// Replace the contents of `path` with `content`.
    fn save(&mut self, path: &Path, content: &str) -> Result<()>;
}

// ── Disk ──────────────────────────────────────────────────────────────────────

/// Reads and writes the local file system.  Writes are always UTF-8.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFileIo;

impl FileIo for DiskFileIo {
    fn load(&mut self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| JotterError::io(path, e))?;
        Ok(decode(&bytes))
    }

    fn save(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| JotterError::io(path, e))
    }
}

/// Decode file bytes to text.
///
/// Detection order:
/// 1. UTF-16 LE BOM (`FF FE`)
/// 2. UTF-16 BE BOM (`FE FF`)
/// 3. UTF-8 BOM (`EF BB BF`), stripped
/// 4. Fallback: UTF-8, invalid sequences replaced with U+FFFD
pub(crate) fn decode(bytes: &[u8]) -> String {
    if let Some(payload) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = payload
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Some(payload) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = payload
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    let payload = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8_lossy(payload).into_owned()
}

// ── In memory ─────────────────────────────────────────────────────────────────

/// A file system held in a map.  Paths not in the map fail to load with
/// `NotFound`; when read-only, every save fails with `PermissionDenied`.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileIo {
    files: HashMap<PathBuf, String>,
    read_only: bool,
}

impl MemoryFileIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl FileIo for MemoryFileIo {
    fn load(&mut self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| JotterError::io(path, io::Error::from(io::ErrorKind::NotFound)))
    }

    fn save(&mut self, path: &Path, content: &str) -> Result<()> {
        if self.read_only {
            return Err(JotterError::io(
                path,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        self.files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
