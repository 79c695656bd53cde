// ── Dialog collaborators ──────────────────────────────────────────────────────
//
// The engine never shows UI.  It describes what it needs, either a
// confirmation with a fixed set of options or a file to open/save, and the
// host answers through whatever toolkit it uses.

use std::path::PathBuf;

use crate::config::FileFilter;

// ── Confirmation ──────────────────────────────────────────────────────────────

/// A modal question with a fixed list of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    pub title: &'a str,
    pub header: &'a str,
    pub body: &'a str,
    pub options: &'a [&'a str],
}

/// Index of `Save & Exit` in [`UNSAVED_CHANGES`].
pub const SAVE_OPTION: usize = 0;
/// Index of `Exit Without Saving` in [`UNSAVED_CHANGES`].
pub const DISCARD_OPTION: usize = 1;
/// Index of `Cancel` in [`UNSAVED_CHANGES`].
pub const CANCEL_OPTION: usize = 2;

/// Asked before an action would drop unsaved edits.
pub const UNSAVED_CHANGES: Prompt<'static> = Prompt {
    title: "Unsaved Changes",
    header: "You have unsaved changes.",
    body: "Would you like to save changes?",
    options: &["Save & Exit", "Exit Without Saving", "Cancel"],
};

/// Answers prompts.  Returns the index of the chosen option, or `None` when
/// the dialog was dismissed without a choice.
pub trait Confirm {
    fn confirm(&mut self, prompt: &Prompt<'_>) -> Option<usize>;
}

impl<F> Confirm for F
where
    F: FnMut(&Prompt<'_>) -> Option<usize>,
{
    fn confirm(&mut self, prompt: &Prompt<'_>) -> Option<usize> {
        self(prompt)
    }
}

// ── File choosers ─────────────────────────────────────────────────────────────

/// Everything a host needs to show an open or save dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialogRequest {
    pub title: &'static str,
    /// Starting folder: `~/Desktop` when it exists, else the home directory.
    pub initial_dir: Option<PathBuf>,
    /// Pre-filled file name (save dialogs only).
    pub initial_name: Option<String>,
    pub filter: FileFilter,
}

/// Describe the "Save File" dialog, pre-filled with `suggested_name`.
pub fn save_request(suggested_name: &str, filter: &FileFilter) -> FileDialogRequest {
    FileDialogRequest {
        title: "Save File",
        initial_dir: default_directory(),
        initial_name: Some(suggested_name.to_owned()),
        filter: filter.clone(),
    }
}

/// Describe the "Load File" dialog.
pub fn open_request(filter: &FileFilter) -> FileDialogRequest {
    FileDialogRequest {
        title: "Load File",
        initial_dir: default_directory(),
        initial_name: None,
        filter: filter.clone(),
    }
}

fn default_directory() -> Option<PathBuf> {
    let home = PathBuf::from(
        std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?,
    );
    let desktop = home.join("Desktop");
    Some(if desktop.is_dir() { desktop } else { home })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
