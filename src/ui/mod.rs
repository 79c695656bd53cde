// ── Presentation helpers ──────────────────────────────────────────────────────
//
// Toolkit-neutral pieces a front end renders: the timestamped output console
// and tab labels.  Nothing here draws anything.

pub mod console;
pub mod tabs;
