//! Subprocess-backed protocol implementation

use super::{LoadRequest, Observation, Protocol, Verb};
use crate::check::Check;
use crate::error::{ProtocolError, ProtocolResult};
use crate::result::CheckResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread;

/// Talks to check programs by spawning one process per exchange
///
/// The child's stderr is inherited so program diagnostics reach the
/// operator; only stdout is captured and decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessProtocol;

impl ProcessProtocol {
    pub fn new() -> Self {
        Self
    }

    /// Run `program verb`, feed it `input` as JSON and decode its stdout
    pub fn call<I, O>(&self, program: &Path, verb: Verb, input: &I) -> ProtocolResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let payload = serde_json::to_vec(input).map_err(ProtocolError::Encode)?;
        tracing::debug!(
            program = %program.display(),
            %verb,
            bytes = payload.len(),
            "invoking check program"
        );

        let io_err = |source| ProtocolError::Io {
            program: program.to_path_buf(),
            source,
        };

        let child = Command::new(program)
            .arg(verb.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProtocolError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let mut guard = ChildGuard::new(child);
        let (status, stdout) = guard.communicate(&payload).map_err(io_err)?;

        if !status.success() {
            return Err(ProtocolError::ExitStatus {
                program: program.to_path_buf(),
                status,
            });
        }

        serde_json::from_slice(&stdout).map_err(|source| ProtocolError::Decode {
            program: program.to_path_buf(),
            source,
        })
    }
}

impl Protocol for ProcessProtocol {
    fn load(&self, file: &Path, dir: &Path) -> ProtocolResult<Vec<Check>> {
        let request = LoadRequest {
            dir: dir.to_path_buf(),
        };
        self.call(file, Verb::Load, &request)
    }

    fn execute(&self, check: &Check) -> ProtocolResult<Observation> {
        self.call(&check.file, Verb::Execute, check)
    }

    fn fix(&self, result: &CheckResult) -> ProtocolResult<Observation> {
        self.call(&result.check.file, Verb::Fix, result)
    }
}

/// Owns a spawned child until it has been reaped
///
/// Dropping an armed guard kills and waits on the child, so an early return
/// never leaves a zombie or a running orphan behind.
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    /// Feed the request, drain stdout and reap the child
    ///
    /// The request is written from a scoped thread while this one reads, so
    /// a program that answers before reading its input cannot wedge both
    /// ends on full pipes. The guard is disarmed once the child is reaped.
    fn communicate(&mut self, payload: &[u8]) -> io::Result<(ExitStatus, Vec<u8>)> {
        let child = self
            .child
            .as_mut()
            .ok_or_else(|| io::Error::other("child already reaped"))?;

        let stdin = child.stdin.take();
        let pipe = child.stdout.take();
        let mut stdout = Vec::new();

        thread::scope(|scope| {
            let writer = scope.spawn(move || write_request(stdin, payload));

            let read = match pipe {
                Some(mut pipe) => pipe.read_to_end(&mut stdout).map(drop),
                None => Ok(()),
            };
            if read.is_err() {
                // Unblock the writer before joining it.
                let _ = child.kill();
            }

            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("request writer panicked")));
            read.and(written)
        })?;

        let status = child.wait()?;
        self.child = None;
        Ok((status, stdout))
    }
}

/// Write the request and close stdin
fn write_request(stdin: Option<ChildStdin>, payload: &[u8]) -> io::Result<()> {
    // The handle is dropped on return, closing the pipe.
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin.write_all(payload) {
        Ok(()) => Ok(()),
        // Programs are free to exit without reading their input.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("check program closed stdin before reading request");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
