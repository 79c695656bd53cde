// ── Process collaborator ──────────────────────────────────────────────────────
//
// Starting a toolchain program is abstracted behind `Spawner` so the runner
// can be driven by a recording fake in tests.  `SystemSpawner` is the real
// thing: `std::process::Command`, with stderr joined onto stdout through a
// single `os_pipe` so the reader sees one ordered byte stream.

use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::error::{JotterError, Result};

/// What to do with a process's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Send both streams to the null device.
    Discard,
    /// Join stderr onto stdout and expose the result via
    /// [`RunningProcess::output`].
    Merged,
}

/// One program launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub output: OutputMode,
}

impl Invocation {
    /// Shell-style rendering for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A started process.
pub trait RunningProcess {
    /// The merged stdout+stderr stream.  Empty for [`OutputMode::Discard`].
    fn output(&mut self) -> &mut dyn BufRead;

    /// Block until the process exits.  `None` when it was ended by a signal.
    fn wait(&mut self) -> io::Result<Option<i32>>;
}

/// Starts programs.
pub trait Spawner {
    fn spawn(&mut self, invocation: &Invocation) -> Result<Box<dyn RunningProcess>>;
}

// ── System implementation ─────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

struct SystemProcess {
    child: Child,
    output: Box<dyn BufRead + Send>,
}

impl RunningProcess for SystemProcess {
    fn output(&mut self) -> &mut dyn BufRead {
        &mut *self.output
    }

    fn wait(&mut self) -> io::Result<Option<i32>> {
        Ok(self.child.wait()?.code())
    }
}

impl Spawner for SystemSpawner {
    fn spawn(&mut self, invocation: &Invocation) -> Result<Box<dyn RunningProcess>> {
        let spawn_failed = |source| JotterError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::null());
        if let Some(dir) = &invocation.working_dir {
            cmd.current_dir(dir);
        }

        let output: Box<dyn BufRead + Send> = match invocation.output {
            OutputMode::Discard => {
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
                Box::new(io::empty())
            }
            OutputMode::Merged => {
                let (reader, writer) = os_pipe::pipe().map_err(spawn_failed)?;
                let writer_clone = writer.try_clone().map_err(spawn_failed)?;
                cmd.stdout(writer).stderr(writer_clone);
                Box::new(BufReader::new(reader))
            }
        };

        debug!(command = %invocation.command_line(), dir = ?invocation.working_dir, "spawning");
        let child = cmd.spawn().map_err(spawn_failed)?;
        // `Command` still holds our copies of the pipe's write end; the reader
        // only sees end-of-stream once they are closed.
        drop(cmd);

        Ok(Box::new(SystemProcess { child, output }))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
