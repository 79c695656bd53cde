// ── Editing session ───────────────────────────────────────────────────────────
//
// The object a front end drives.  Owns the buffer store, the active-buffer
// pointer, the compile runner and the console.  Every command is explicit:
// an edit returns fresh spans and the dirty flag instead of firing change
// listeners, and a switch is a pure view change.
//
// Invariant: `active` always names a buffer in `store`.  A session starts
// with one unnamed buffer and buffers are never removed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::buffer::{BufferId, BufferState, BufferStore, CloseDecision, SaveOutcome};
use crate::config::EditorConfig;
use crate::error::{JotterError, Result};
use crate::languages::language_from_path;
use crate::platform::dialogs::{self, Confirm, FileDialogRequest};
use crate::platform::fs::{DiskFileIo, FileIo};
use crate::platform::process::{Spawner, SystemSpawner};
use crate::runner::{CompileRunner, RunOutcome};
use crate::syntax::{highlight, TokenSpan};
use crate::ui::console::Console;
use crate::ui::tabs::{tab_label, Tab};

/// Console notice when a save or run has no file to write to.
pub const NO_FILE_SELECTED: &str = "No file selected";

// ── Views ─────────────────────────────────────────────────────────────────────

/// What changed after [`Session::edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub spans: Vec<TokenSpan>,
    pub dirty: bool,
}

/// Everything needed to draw one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView<'a> {
    pub id: &'a BufferId,
    pub content: &'a str,
    pub dirty: bool,
    pub spans: Vec<TokenSpan>,
}

// ── Session ───────────────────────────────────────────────────────────────────

pub struct Session<F = DiskFileIo, S = SystemSpawner> {
    store: BufferStore,
    active: BufferId,
    files: F,
    runner: CompileRunner<S>,
    console: Console,
    config: EditorConfig,
}

impl Session {
    /// A session on the real file system and process table.
    pub fn with_system(config: EditorConfig) -> Self {
        Self::new(config, DiskFileIo, SystemSpawner)
    }
}

impl<F: FileIo, S: Spawner> Session<F, S> {
    /// Start a session holding a single empty unnamed buffer.
    pub fn new(config: EditorConfig, files: F, spawner: S) -> Self {
        let mut store = BufferStore::from_config(&config);
        let active = store.new_buffer();
        let runner = CompileRunner::new(spawner, config.toolchain.clone());
        Self {
            store,
            active,
            files,
            runner,
            console: Console::new(),
            config,
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Create a fresh unnamed buffer and make it active.
    pub fn new_file(&mut self) -> BufferId {
        let id = self.store.new_buffer();
        self.active = id.clone();
        id
    }

    /// Load `path` and make it active.
    ///
    /// Relative paths are resolved against the current directory.  On a read
    /// failure nothing changes, including the active buffer.
    pub fn open(&mut self, path: &Path) -> Result<BufferId> {
        let path = absolute(path)?;
        let id = self.store.open(&mut self.files, &path)?;
        self.active = id.clone();
        self.console.push(&format!("Loaded file: {}", path.display()));
        Ok(id)
    }

    /// Save the active buffer to its own file.
    ///
    /// An unnamed dirty buffer fails with [`JotterError::NeedsPath`] after a
    /// `No file selected` notice; ask the user for a path and call
    /// [`Session::save_as`].
    pub fn save(&mut self) -> Result<SaveOutcome> {
        match self.store.save(&mut self.files, &self.active) {
            Ok(SaveOutcome::Saved(path)) => {
                self.console.push(&format!("Saved file: {}", path.display()));
                Ok(SaveOutcome::Saved(path))
            }
            Ok(SaveOutcome::Clean) => Ok(SaveOutcome::Clean),
            Err(e @ JotterError::NeedsPath(_)) => {
                self.console.push(NO_FILE_SELECTED);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Save the active buffer to `path`; the buffer is re-keyed under that
    /// path and stays active.
    pub fn save_as(&mut self, path: &Path) -> Result<BufferId> {
        let path = absolute(path)?;
        let id = self.store.save_as(&mut self.files, &self.active, &path)?;
        self.active = id.clone();
        self.console.push(&format!("File saved: {}", path.display()));
        Ok(id)
    }

    /// Make `id` active and return it as it was left.
    ///
    /// Neither the content nor the dirty flag of any buffer changes.
    pub fn switch_to(&mut self, id: &BufferId) -> Result<BufferView<'_>> {
        self.store.restore(id)?;
        self.active = id.clone();
        info!(buffer = %id, "switched buffer");
        self.console.push(&format!("Loaded cache: {id}"));
        Ok(self.view())
    }

    /// Replace the content of `id` and return its new spans and dirty flag.
    pub fn edit(&mut self, id: &BufferId, content: impl Into<String>) -> Result<EditOutcome> {
        let dirty = self.store.edit(id, content)?;
        let text = self.store.restore(id)?.content();
        let spans = highlight(language_from_path(id.as_path()), text);
        debug!(buffer = %id, dirty, spans = spans.len(), "edited");
        Ok(EditOutcome { spans, dirty })
    }

    /// Save the active buffer if needed, then compile and run it.
    ///
    /// Output lines are appended to the console in order.  A buffer with no
    /// file yet fails with [`JotterError::NeedsPath`] and nothing runs.
    pub fn run(&mut self) -> Result<RunOutcome> {
        let Some(source) = self.active.destination().map(Path::to_path_buf) else {
            self.console.push(NO_FILE_SELECTED);
            return Err(JotterError::NeedsPath(self.active.clone()));
        };
        self.save()?;

        let outcome = self.runner.compile_and_run(&source)?;
        self.console.extend(outcome.lines());
        if let RunOutcome::Completed {
            exit_code: Some(code),
            ..
        } = &outcome
        {
            if *code != 0 {
                warn!(source = %source.display(), code, "program exited with nonzero status");
            }
        }
        Ok(outcome)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn is_dirty(&self, id: &BufferId) -> Result<bool> {
        self.store.is_dirty(id)
    }

    /// `true` if any open buffer has unsaved changes.
    pub fn has_unsaved(&self) -> bool {
        self.store.any_dirty()
    }

    pub fn active(&self) -> &BufferId {
        &self.active
    }

    /// The active buffer, ready to draw.
    pub fn view(&self) -> BufferView<'_> {
        let state = self.store.get(&self.active);
        let content = state.map_or("", BufferState::content);
        BufferView {
            id: &self.active,
            content,
            dirty: state.is_some_and(BufferState::is_dirty),
            spans: highlight(language_from_path(self.active.as_path()), content),
        }
    }

    /// Tab bar entries in open order.
    pub fn tabs(&self) -> Vec<Tab> {
        self.store
            .iter()
            .map(|(id, state)| Tab {
                id: id.clone(),
                label: tab_label(id, state.is_dirty()),
                active: *id == self.active,
            })
            .collect()
    }

    pub fn buffer_count(&self) -> usize {
        self.store.len()
    }

    // ── Unsaved-changes guard ─────────────────────────────────────────────────

    /// Ask whether the active buffer's unsaved edits may be dropped.
    pub fn prompt_close(&self, confirm: &mut dyn Confirm) -> Result<CloseDecision> {
        self.store.prompt_close(&self.active, confirm)
    }

    /// Carry out `decision` for the active buffer.  Returns whether the
    /// guarded action may go ahead.
    pub fn resolve_close(&mut self, decision: CloseDecision) -> Result<bool> {
        match decision {
            CloseDecision::Save => {
                self.save()?;
                Ok(true)
            }
            CloseDecision::Discard => Ok(true),
            CloseDecision::Cancel => Ok(false),
        }
    }

    // ── Dialog requests ───────────────────────────────────────────────────────

    /// Save dialog pre-filled with the active buffer's file name.
    pub fn save_dialog_request(&self) -> FileDialogRequest {
        dialogs::save_request(&self.active.file_name(), &self.config.file_filter)
    }

    pub fn open_dialog_request(&self) -> FileDialogRequest {
        dialogs::open_request(&self.config.file_filter)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn runner(&self) -> &CompileRunner<S> {
        &self.runner
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| JotterError::io(path, e))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
