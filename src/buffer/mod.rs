// ── Buffer store ──────────────────────────────────────────────────────────────
//
// Owns every open buffer for the lifetime of the session.  Buffers are never
// closed; switching between them is a pure view change.  Dirty state is not
// stored anywhere: it is always `content != last_saved`.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::error::{JotterError, Result};
use crate::platform::dialogs::{self, Confirm};
use crate::platform::fs::FileIo;

// ── Identifiers ───────────────────────────────────────────────────────────────

/// Names a buffer: either a file on disk or a synthetic unsaved name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BufferId {
    /// Never written to disk, e.g. `unnamed_file2.java`.
    Unnamed(String),
    /// Backed by this file.
    File(PathBuf),
}

impl BufferId {
    pub fn unnamed(name: impl Into<String>) -> Self {
        Self::Unnamed(name.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// The absolute file this buffer saves to, if it has one.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            Self::File(path) if path.is_absolute() => Some(path),
            _ => None,
        }
    }

    /// Path-like view used for language detection and labels.
    pub fn as_path(&self) -> &Path {
        match self {
            Self::Unnamed(name) => Path::new(name),
            Self::File(path) => path,
        }
    }

    /// Final path component, e.g. `Main.java`.
    pub fn file_name(&self) -> String {
        self.as_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unnamed(name) => f.write_str(name),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ── BufferState ───────────────────────────────────────────────────────────────

/// Live text of one buffer plus the text last written to storage.
///
/// Only [`BufferStore`] can change either field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BufferState {
    content: String,
    last_saved: String,
}

impl BufferState {
    fn clean(text: String) -> Self {
        Self {
            last_saved: text.clone(),
            content: text,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn last_saved(&self) -> &str {
        &self.last_saved
    }

    /// `true` when the live content differs from what was last saved.
    pub fn is_dirty(&self) -> bool {
        self.content != self.last_saved
    }
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Result of a successful [`BufferStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content written to this file.
    Saved(PathBuf),
    /// Nothing to do: the buffer had no unsaved changes.
    Clean,
}

/// How the user resolved an unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Save first, then go ahead.
    Save,
    /// Go ahead and drop the unsaved changes.
    Discard,
    /// Abandon the action.
    Cancel,
}

impl CloseDecision {
    /// Map an answer to [`dialogs::UNSAVED_CHANGES`].  A dismissed dialog
    /// counts as `Discard`.
    pub fn from_choice(choice: Option<usize>) -> Self {
        match choice {
            Some(dialogs::SAVE_OPTION) => Self::Save,
            Some(dialogs::CANCEL_OPTION) => Self::Cancel,
            _ => Self::Discard,
        }
    }
}

// ── BufferStore ───────────────────────────────────────────────────────────────

/// All open buffers, in the order they were opened.
#[derive(Debug)]
pub struct BufferStore {
    buffers: IndexMap<BufferId, BufferState>,
    /// Number of unnamed names handed out so far.  Only ever increases.
    unnamed_counter: u32,
    unnamed_stem: String,
    extension: String,
}

impl BufferStore {
    /// An empty store naming unsaved buffers `<stem>.<extension>`,
    /// `<stem>1.<extension>`, …
    pub fn new(unnamed_stem: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            buffers: IndexMap::new(),
            unnamed_counter: 0,
            unnamed_stem: unnamed_stem.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.unnamed_stem.clone(), config.extension.clone())
    }

    // ── Creation ──────────────────────────────────────────────────────────────

    /// Create an empty, clean, unnamed buffer and return its identifier.
    ///
    /// Names are never reused, even after an unnamed buffer is saved under a
    /// real path.
    pub fn new_buffer(&mut self) -> BufferId {
        let id = BufferId::Unnamed(self.next_unnamed_name());
        self.buffers.insert(id.clone(), BufferState::default());
        info!(buffer = %id, "new buffer");
        id
    }

    fn next_unnamed_name(&mut self) -> String {
        let index = self.unnamed_counter;
        self.unnamed_counter += 1;
        if index == 0 {
            format!("{}.{}", self.unnamed_stem, self.extension)
        } else {
            format!("{}{index}.{}", self.unnamed_stem, self.extension)
        }
    }

    /// Load `path` through `files` into a clean buffer.
    ///
    /// A file that is already open is returned as-is, keeping any unsaved
    /// edits.  On a read failure the store is left unchanged.
    pub fn open(&mut self, files: &mut dyn FileIo, path: &Path) -> Result<BufferId> {
        let id = BufferId::file(path);
        if self.buffers.contains_key(&id) {
            debug!(buffer = %id, "already open");
            return Ok(id);
        }
        let text = files.load(path)?;
        info!(path = %path.display(), bytes = text.len(), "loaded file");
        self.buffers.insert(id.clone(), BufferState::clean(text));
        Ok(id)
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Replace the live content of `id` and return the recomputed dirty flag.
    pub fn edit(&mut self, id: &BufferId, content: impl Into<String>) -> Result<bool> {
        let state = self.state_mut(id)?;
        state.content = content.into();
        Ok(state.is_dirty())
    }

    /// Content to put back on screen when `id` becomes active again.
    ///
    /// Read-only: neither `content` nor `last_saved` changes, so the dirty
    /// flag is exactly what it was when the buffer was left.
    pub fn restore(&self, id: &BufferId) -> Result<&BufferState> {
        self.get(id).ok_or_else(|| JotterError::UnknownBuffer(id.clone()))
    }

    /// Write `id` to its file if it has unsaved changes.
    ///
    /// A clean buffer is a no-op.  A dirty buffer without an absolute
    /// destination fails with [`JotterError::NeedsPath`]; use
    /// [`BufferStore::save_as`].  On a write failure the buffer stays dirty.
    pub fn save(&mut self, files: &mut dyn FileIo, id: &BufferId) -> Result<SaveOutcome> {
        let state = self.state_mut(id)?;
        if !state.is_dirty() {
            return Ok(SaveOutcome::Clean);
        }
        let path = id
            .destination()
            .ok_or_else(|| JotterError::NeedsPath(id.clone()))?;
        files.save(path, &state.content)?;
        state.last_saved = state.content.clone();
        info!(path = %path.display(), "saved file");
        Ok(SaveOutcome::Saved(path.to_path_buf()))
    }

    /// Write `id` to `path` and re-key it under that path, keeping its place
    /// in the open order.  Written even when clean.
    ///
    /// Another buffer already open on `path` is replaced.  On a write failure
    /// the store is left unchanged.
    pub fn save_as(
        &mut self,
        files: &mut dyn FileIo,
        id: &BufferId,
        path: &Path,
    ) -> Result<BufferId> {
        let content = self.restore(id)?.content.clone();
        files.save(path, &content)?;

        let new_id = BufferId::file(path);
        if new_id != *id {
            self.buffers.shift_remove(&new_id);
        }
        let index = self
            .buffers
            .get_index_of(id)
            .ok_or_else(|| JotterError::UnknownBuffer(id.clone()))?;
        self.buffers.shift_remove_index(index);
        self.buffers
            .shift_insert(index, new_id.clone(), BufferState::clean(content));
        info!(from = %id, path = %path.display(), "saved file as");
        Ok(new_id)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Ask whether unsaved edits in `id` may be dropped.
    ///
    /// Only a dirty buffer triggers a prompt; a clean one answers `Discard`
    /// since there is nothing to lose.  The store does not act on the
    /// decision.
    pub fn prompt_close(&self, id: &BufferId, confirm: &mut dyn Confirm) -> Result<CloseDecision> {
        if !self.is_dirty(id)? {
            return Ok(CloseDecision::Discard);
        }
        Ok(CloseDecision::from_choice(
            confirm.confirm(&dialogs::UNSAVED_CHANGES),
        ))
    }

    pub fn is_dirty(&self, id: &BufferId) -> Result<bool> {
        Ok(self.restore(id)?.is_dirty())
    }

    /// `true` if any open buffer has unsaved changes.
    pub fn any_dirty(&self) -> bool {
        self.buffers.values().any(BufferState::is_dirty)
    }

    pub fn get(&self, id: &BufferId) -> Option<&BufferState> {
        self.buffers.get(id)
    }

    pub fn contains(&self, id: &BufferId) -> bool {
        self.buffers.contains_key(id)
    }

    /// Buffers in open order.
    pub fn iter(&self) -> impl Iterator<Item = (&BufferId, &BufferState)> {
        self.buffers.iter()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    fn state_mut(&mut self, id: &BufferId) -> Result<&mut BufferState> {
        self.buffers
            .get_mut(id)
            .ok_or_else(|| JotterError::UnknownBuffer(id.clone()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
