// ── Jotter ────────────────────────────────────────────────────────────────────
//
// Editing-session engine for a lightweight Java editor: syntax highlighting,
// buffers with dirty tracking, and a blocking compile-then-run pipeline.
// The engine draws nothing; a front end drives `session::Session` and
// renders what it returns.

#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod editor;
pub mod error;
pub mod languages;
pub mod platform;
pub mod runner;
pub mod session;
pub mod syntax;
pub mod ui;

pub use buffer::{BufferId, BufferState, BufferStore, CloseDecision, SaveOutcome};
pub use config::EditorConfig;
pub use error::{JotterError, Result};
pub use runner::{CompileRunner, RunOutcome};
pub use session::{BufferView, EditOutcome, Session};
pub use syntax::{tokenize, TokenKind, TokenSpan};
pub use ui::console::{Console, OutputSink};
