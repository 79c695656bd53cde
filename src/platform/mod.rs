// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interfaces the engine uses to talk to the outside
// world: files, processes and the user.  Everything else in the crate goes
// through these traits and never calls the OS directly.

pub mod dialogs;
pub mod fs;
pub mod process;
