// ── Compile-then-run pipeline ─────────────────────────────────────────────────
//
// Two blocking stages against a saved source file:
//   1. compile it in its own folder and wait;
//   2. only if that exited 0, run the compiled unit with the folder on the
//      class path and collect its merged stdout+stderr line by line.
//
// There is no timeout: a program that never exits, or never closes its
// output, blocks `compile_and_run` forever.  Hosts with an event loop should
// call it off their UI thread.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Toolchain;
use crate::error::{JotterError, Result};
use crate::platform::process::{Invocation, OutputMode, Spawner};

/// The only output shown when compilation fails.
pub const COMPILATION_FAILED: &str = "Compilation failed";

// ── Outcome ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The compiler exited nonzero; the program was not run.
    CompileFailed,
    /// The program ran to completion.
    Completed {
        /// Merged stdout+stderr, split on line terminators, in order.
        lines: Vec<String>,
        /// The program's exit code; `None` if it was ended by a signal.
        exit_code: Option<i32>,
    },
}

impl RunOutcome {
    /// Lines to show the user: exactly `["Compilation failed"]`, or exactly
    /// what the program printed.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::CompileFailed => vec![COMPILATION_FAILED],
            Self::Completed { lines, .. } => lines.iter().map(String::as_str).collect(),
        }
    }

    /// `true` when the program ran and exited 0.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Completed { exit_code: Some(0), .. })
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

pub struct CompileRunner<S> {
    spawner: S,
    toolchain: Toolchain,
}

impl<S: Spawner> CompileRunner<S> {
    pub fn new(spawner: S, toolchain: Toolchain) -> Self {
        Self { spawner, toolchain }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Compile `source`, then run it if compilation succeeded.
    ///
    /// # Errors
    ///
    /// * [`JotterError::Spawn`] if either program cannot be started.
    /// * [`JotterError::Process`] if waiting on a process, or reading its
    ///   output, fails.
    pub fn compile_and_run(&mut self, source: &Path) -> Result<RunOutcome> {
        let dir = source
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let unit = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let compile = self.compile_invocation(source, dir);
        info!(source = %source.display(), "compiling");
        let mut compiler = self.spawner.spawn(&compile)?;
        let status = compiler
            .wait()
            .map_err(|source| process_error(&compile, source))?;
        if status != Some(0) {
            info!(source = %source.display(), ?status, "compilation failed");
            return Ok(RunOutcome::CompileFailed);
        }

        let run = self.run_invocation(dir, &unit);
        info!(unit = %unit, "running");
        let mut program = self.spawner.spawn(&run)?;
        let lines = read_lines(program.output()).map_err(|source| process_error(&run, source))?;
        let exit_code = program
            .wait()
            .map_err(|source| process_error(&run, source))?;
        debug!(unit = %unit, lines = lines.len(), ?exit_code, "program finished");

        Ok(RunOutcome::Completed { lines, exit_code })
    }

    fn compile_invocation(&self, source: &Path, dir: &Path) -> Invocation {
        let mut args = self.toolchain.compiler_args.clone();
        args.push(source.to_string_lossy().into_owned());
        Invocation {
            program: self.toolchain.compiler.clone(),
            args,
            working_dir: Some(dir.to_path_buf()),
            output: OutputMode::Discard,
        }
    }

    fn run_invocation(&self, dir: &Path, unit: &str) -> Invocation {
        let mut args = self.toolchain.runner_args.clone();
        args.push(self.toolchain.classpath_flag.clone());
        args.push(dir.to_string_lossy().into_owned());
        args.push(unit.to_owned());
        Invocation {
            program: self.toolchain.runner.clone(),
            args,
            working_dir: None,
            output: OutputMode::Merged,
        }
    }
}

fn process_error(invocation: &Invocation, source: std::io::Error) -> JotterError {
    JotterError::Process {
        program: invocation.program.clone(),
        source,
    }
}

/// Read `reader` to end of stream, splitting on `\n`, `\r\n` and lone `\r`.
///
/// A final line without a terminator is kept; no empty line is added after
/// a trailing terminator.  Invalid UTF-8 is replaced with U+FFFD.
fn read_lines(reader: &mut dyn BufRead) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut chunk = Vec::new();
    loop {
        chunk.clear();
        if reader.read_until(b'\n', &mut chunk)? == 0 {
            break;
        }
        let mut body: &[u8] = &chunk;
        let had_newline = body.last() == Some(&b'\n');
        if had_newline {
            body = &body[..body.len() - 1];
            if body.last() == Some(&b'\r') {
                body = &body[..body.len() - 1];
            }
        }
        let mut parts: Vec<&[u8]> = body.split(|&b| b == b'\r').collect();
        // A lone `\r` right before end of stream ends the last line rather
        // than starting an empty one.
        if !had_newline && body.last() == Some(&b'\r') {
            parts.pop();
        }
        lines.extend(parts.into_iter().map(|p| String::from_utf8_lossy(p).into_owned()));
    }
    Ok(lines)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::{self, Cursor};
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::platform::process::RunningProcess;

    struct FakeProcess {
        output: Cursor<Vec<u8>>,
        exit: Option<i32>,
    }

    impl RunningProcess for FakeProcess {
        fn output(&mut self) -> &mut dyn BufRead {
            &mut self.output
        }

        fn wait(&mut self) -> io::Result<Option<i32>> {
            Ok(self.exit)
        }
    }

    /// Plays back scripted processes and records every invocation.
    #[derive(Default)]
    struct Scripted {
        script: VecDeque<(&'static str, Option<i32>)>,
        seen: Vec<Invocation>,
    }

    impl Scripted {
        fn new(script: &[(&'static str, Option<i32>)]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                seen: Vec::new(),
            }
        }
    }

    impl Spawner for Scripted {
        fn spawn(&mut self, invocation: &Invocation) -> Result<Box<dyn RunningProcess>> {
            self.seen.push(invocation.clone());
            let (output, exit) = self.script.pop_front().ok_or_else(|| JotterError::Spawn {
                program: invocation.program.clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })?;
            Ok(Box::new(FakeProcess {
                output: Cursor::new(output.as_bytes().to_vec()),
                exit,
            }))
        }
    }

    fn runner(script: &[(&'static str, Option<i32>)]) -> CompileRunner<Scripted> {
        CompileRunner::new(Scripted::new(script), Toolchain::default())
    }

    fn lines_of(bytes: &[u8]) -> Vec<String> {
        read_lines(&mut Cursor::new(bytes.to_vec())).expect("read")
    }

    #[test]
    fn compile_failure_short_circuits() {
        let mut r = runner(&[("", Some(1))]);
        let outcome = r
            .compile_and_run(Path::new("/w/Main.java"))
            .expect("pipeline");
        assert_eq!(outcome, RunOutcome::CompileFailed);
        assert_eq!(outcome.lines(), ["Compilation failed"]);
        assert_eq!(r.spawner().seen.len(), 1, "run stage must not start");
    }

    #[test]
    fn compile_killed_by_signal_counts_as_failure() {
        let mut r = runner(&[("", None)]);
        let outcome = r.compile_and_run(Path::new("/w/Main.java")).expect("pipeline");
        assert_eq!(outcome, RunOutcome::CompileFailed);
    }

    #[test]
    fn success_returns_program_lines_in_order() {
        let mut r = runner(&[("", Some(0)), ("a\nb\n", Some(0))]);
        let outcome = r
            .compile_and_run(Path::new("/w/Main.java"))
            .expect("pipeline");
        assert_eq!(outcome.lines(), ["a", "b"]);
        assert!(outcome.succeeded());
    }

    #[test]
    fn invocations_follow_the_toolchain() {
        let mut r = runner(&[("", Some(0)), ("", Some(0))]);
        r.compile_and_run(Path::new("/w/src/Hello.java"))
            .expect("pipeline");
        let seen = &r.spawner().seen;
        assert_eq!(
            seen[0],
            Invocation {
                program: "javac".to_owned(),
                args: vec!["/w/src/Hello.java".to_owned()],
                working_dir: Some(PathBuf::from("/w/src")),
                output: OutputMode::Discard,
            }
        );
        assert_eq!(
            seen[1],
            Invocation {
                program: "java".to_owned(),
                args: vec!["-cp".to_owned(), "/w/src".to_owned(), "Hello".to_owned()],
                working_dir: None,
                output: OutputMode::Merged,
            }
        );
    }

    #[test]
    fn extra_toolchain_args_come_first() {
        let toolchain = Toolchain {
            compiler_args: vec!["-g".to_owned()],
            runner_args: vec!["-ea".to_owned()],
            ..Toolchain::default()
        };
        let mut r = CompileRunner::new(
            Scripted::new(&[("", Some(0)), ("", Some(0))]),
            toolchain,
        );
        r.compile_and_run(Path::new("/w/A.java")).expect("pipeline");
        assert_eq!(r.spawner().seen[0].args, ["-g", "/w/A.java"]);
        assert_eq!(r.spawner().seen[1].args, ["-ea", "-cp", "/w", "A"]);
    }

    #[test]
    fn nonzero_program_exit_is_reported_separately() {
        let mut r = runner(&[("", Some(0)), ("boom\n", Some(2))]);
        let outcome = r.compile_and_run(Path::new("/w/A.java")).expect("pipeline");
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                lines: vec!["boom".to_owned()],
                exit_code: Some(2),
            }
        );
        assert!(!outcome.succeeded());
    }

    #[test]
    fn missing_compiler_is_a_spawn_error() {
        let mut r = runner(&[]);
        let err = r
            .compile_and_run(Path::new("/w/A.java"))
            .expect_err("no compiler");
        assert!(matches!(err, JotterError::Spawn { ref program, .. } if program == "javac"));
    }

    #[test]
    fn missing_runner_is_a_spawn_error() {
        let mut r = runner(&[("", Some(0))]);
        let err = r
            .compile_and_run(Path::new("/w/A.java"))
            .expect_err("no runner");
        assert!(matches!(err, JotterError::Spawn { ref program, .. } if program == "java"));
    }

    #[test]
    fn relative_source_compiles_in_current_dir() {
        let mut r = runner(&[("", Some(0)), ("", Some(0))]);
        r.compile_and_run(Path::new("A.java")).expect("pipeline");
        assert_eq!(r.spawner().seen[0].working_dir, Some(PathBuf::from(".")));
        assert_eq!(r.spawner().seen[1].args, ["-cp", ".", "A"]);
    }

    #[test]
    fn line_splitting() {
        assert_eq!(lines_of(b""), Vec::<String>::new());
        assert_eq!(lines_of(b"a"), ["a"]);
        assert_eq!(lines_of(b"a\n"), ["a"]);
        assert_eq!(lines_of(b"a\n\n"), ["a", ""]);
        assert_eq!(lines_of(b"a\r\nb\r\n"), ["a", "b"]);
        assert_eq!(lines_of(b"a\rb\n"), ["a", "b"]);
        assert_eq!(lines_of(b"a\r"), ["a"]);
        assert_eq!(lines_of(b"a\r\r\n"), ["a", ""]);
        assert_eq!(lines_of(b"\n"), [""]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(lines_of(b"caf\xE9\n"), ["caf\u{FFFD}"]);
    }
}
