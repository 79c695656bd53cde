// Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, BufRead, Cursor};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use jotter::config::EditorConfig;
use jotter::platform::fs::MemoryFileIo;
use jotter::platform::process::{Invocation, RunningProcess, Spawner};
use jotter::{JotterError, Result, Session};

/// A scripted process: what it prints and how it exits.
#[derive(Debug, Clone)]
pub struct Script {
    pub output: String,
    pub exit: Option<i32>,
}

impl Script {
    pub fn exits(code: i32) -> Self {
        Self {
            output: String::new(),
            exit: Some(code),
        }
    }

    pub fn prints(output: &str) -> Self {
        Self {
            output: output.to_owned(),
            exit: Some(0),
        }
    }
}

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

/// Plays back scripts in order and records every invocation.  Clones share
/// the same record, so a test can keep one while the session owns another.
/// Running out of scripts behaves like a missing executable.
#[derive(Clone, Default)]
pub struct RecordingSpawner {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    seen: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingSpawner {
    pub fn new(scripts: impl IntoIterator<Item = Script>) -> Self {
        Self {
            scripts: Arc::new(Mutex::new(scripts.into_iter().collect())),
            seen: Arc::default(),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.seen.lock().expect("lock").clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.program).collect()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&mut self, invocation: &Invocation) -> Result<Box<dyn RunningProcess>> {
        self.seen.lock().expect("lock").push(invocation.clone());
        let script = self
            .scripts
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| JotterError::Spawn {
                program: invocation.program.clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })?;
        Ok(Box::new(FakeProcess {
            output: Cursor::new(script.output.into_bytes()),
            exit: script.exit,
        }))
    }
}

/// An absolute directory that need not exist; files live in memory.
pub fn root() -> PathBuf {
    std::env::temp_dir().join("jotter-fixture")
}

pub type TestSession = Session<MemoryFileIo, RecordingSpawner>;

pub fn session(files: MemoryFileIo, spawner: RecordingSpawner) -> TestSession {
    Session::new(EditorConfig::default(), files, spawner)
}
