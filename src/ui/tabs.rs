// ── Tab bar state ─────────────────────────────────────────────────────────────
//
// Pure state that a front end mirrors into whatever tab control it has.

use crate::buffer::BufferId;

/// Suffix appended to the label of a buffer with unsaved changes.
pub const DIRTY_MARKER: &str = "(*)";

/// One entry of the tab bar, in open order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: BufferId,
    pub label: String,
    pub active: bool,
}

/// Compute the display label for a tab.
///
/// Format:
/// - clean → `"Main.java"`
/// - dirty → `"Main.java(*)"`
pub fn tab_label(id: &BufferId, dirty: bool) -> String {
    let name = id.file_name();
    if dirty {
        format!("{name}{DIRTY_MARKER}")
    } else {
        name
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
