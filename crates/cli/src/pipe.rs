// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! NUL-framed command pipe to a radare2 child process.
//!
//! The child is launched with `-q0`, which makes it print a startup banner
//! and every command response terminated by a single `0x00` byte. A [`Pipe`]
//! owns exactly one child for its whole lifetime and speaks to it one
//! command at a time.
//!
//! # Example
//!
//! ```no_run
//! use r2r::pipe::{Pipe, PipeConfig};
//!
//! # async fn example() -> Result<(), r2r::pipe::PipeError> {
//! let mut pipe = Pipe::open(&PipeConfig::default(), &[], "/bin/ls").await?;
//! let disasm = pipe.cmd("pd 1").await?;
//! let info = pipe.cmdj("ij").await?;
//! pipe.close().await?;
//! # Ok(())
//! # }
//! ```

use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

/// Byte terminating the banner and every response.
pub const SENTINEL: u8 = 0x00;

/// Flag asking the child for quiet, NUL-framed output.
pub const QUIET_FLAG: &str = "-q0";

/// Forced quit, no confirmation prompt.
const QUIT_COMMAND: &str = "q!";

/// Errors that can occur while talking to the child.
#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    /// Failed to spawn the child process.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Process stdin not available.
    #[error("stdin not available")]
    StdinNotAvailable,

    /// Process stdout not available.
    #[error("stdout not available")]
    StdoutNotAvailable,

    /// IO error during read/write/wait.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The startup banner could not be read.
    #[error("no startup banner after {attempts} attempts: {source}")]
    Handshake {
        attempts: u32,
        #[source]
        source: io::Error,
    },

    /// Stream ended before the sentinel byte.
    #[error("process exited unexpectedly")]
    ProcessExited,

    /// The command would break response framing.
    #[error("command contains a NUL byte or newline: {0:?}")]
    Unframeable(String),

    /// Response was not valid JSON.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Child exited with a failure status after quitting.
    #[error("process exited with {0}")]
    Exit(ExitStatus),
}

/// Retry budget for reading the startup banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake {
    /// Reads attempted before giving up, including the first.
    pub attempts: u32,
    /// Pause between failed reads.
    pub backoff: Duration,
}

impl Default for Handshake {
    fn default() -> Self {
        Self {
            attempts: 4,
            backoff: Duration::from_secs(1),
        }
    }
}

/// How sessions launch the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeConfig {
    /// Binary to execute.
    pub program: PathBuf,
    /// Pass the child's stderr through instead of discarding it.
    pub inherit_stderr: bool,
    pub handshake: Handshake,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("r2"),
            inherit_stderr: false,
            handshake: Handshake::default(),
        }
    }
}

/// One protocol session bound to one child process.
pub struct Pipe {
    file: String,
    child: Child,
    stdin: BufWriter<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl Pipe {
    /// Launch `<program> <args..> -q0 [file]` and consume its banner.
    ///
    /// An empty `file` attaches no target. The child is killed if the pipe
    /// is dropped without [`Pipe::close`].
    pub async fn open(config: &PipeConfig, args: &[String], file: &str) -> Result<Self, PipeError> {
        let mut cmd = Command::new(&config.program);
        cmd.args(args).arg(QUIET_FLAG);
        if !file.is_empty() {
            cmd.arg(file);
        }

        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(if config.inherit_stderr {
            Stdio::inherit()
        } else {
            Stdio::null()
        });
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| PipeError::Spawn {
            program: config.program.display().to_string(),
            source,
        })?;

        let stdin = child.stdin.take().ok_or(PipeError::StdinNotAvailable)?;
        let stdout = child.stdout.take().ok_or(PipeError::StdoutNotAvailable)?;

        let mut pipe = Self {
            file: file.to_string(),
            child,
            stdin: BufWriter::new(stdin),
            stdout: BufReader::new(stdout),
        };
        await_banner(&mut pipe.stdout, config.handshake).await?;
        Ok(pipe)
    }

    /// Target file the session was opened with.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Run one command and return its textual output.
    pub async fn cmd(&mut self, command: &str) -> Result<String, PipeError> {
        self.send(command).await?;
        let frame = read_frame(&mut self.stdout).await?;
        Ok(String::from_utf8_lossy(&frame).into_owned())
    }

    /// Run one command and parse its output as JSON.
    pub async fn cmdj(&mut self, command: &str) -> Result<serde_json::Value, PipeError> {
        self.send(command).await?;
        let frame = read_frame(&mut self.stdout).await?;
        Ok(serde_json::from_slice(&frame)?)
    }

    /// Quit the child and wait for it.
    ///
    /// Sessions without a target are left to `kill_on_drop`.
    pub async fn close(self) -> Result<(), PipeError> {
        let Self {
            file,
            mut child,
            mut stdin,
            mut stdout,
        } = self;
        if file.is_empty() {
            return Ok(());
        }

        write_line(&mut stdin, QUIT_COMMAND).await?;
        // Some builds exit on `q!` without a trailing sentinel.
        let mut rest = Vec::new();
        stdout.read_until(SENTINEL, &mut rest).await?;
        drop(stdin);

        let status = child.wait().await?;
        if !status.success() {
            return Err(PipeError::Exit(status));
        }
        Ok(())
    }

    async fn send(&mut self, command: &str) -> Result<(), PipeError> {
        if !is_frameable(command) {
            return Err(PipeError::Unframeable(command.to_string()));
        }
        write_line(&mut self.stdin, command).await
    }
}

/// Consume the startup banner, retrying failed reads.
///
/// End of stream means the child is gone, so it is never retried.
pub async fn await_banner<R>(reader: &mut R, handshake: Handshake) -> Result<(), PipeError>
where
    R: AsyncBufRead + Unpin,
{
    let mut attempt = 1;
    loop {
        match read_frame(reader).await {
            Ok(_) => return Ok(()),
            Err(PipeError::Io(source)) if attempt < handshake.attempts => {
                debug!(attempt, error = %source, "startup banner not readable yet");
                attempt += 1;
                tokio::time::sleep(handshake.backoff).await;
            }
            Err(PipeError::Io(source)) => {
                return Err(PipeError::Handshake {
                    attempts: attempt,
                    source,
                })
            }
            Err(e) => return Err(e),
        }
    }
}

/// Read up to the sentinel, which is not included.
async fn read_frame<R>(reader: &mut R) -> Result<Vec<u8>, PipeError>
where
    R: AsyncBufRead + Unpin,
{
    let mut frame = Vec::new();
    reader.read_until(SENTINEL, &mut frame).await?;
    match frame.pop() {
        Some(SENTINEL) => Ok(frame),
        _ => Err(PipeError::ProcessExited),
    }
}

/// Whether a command can be sent without corrupting the framing.
pub fn is_frameable(command: &str) -> bool {
    !command.bytes().any(|b| b == SENTINEL || b == b'\n')
}

async fn write_line(stdin: &mut BufWriter<ChildStdin>, line: &str) -> Result<(), PipeError> {
    stdin.write_all(line.as_bytes()).await?;
    stdin.write_all(b"\n").await?;
    stdin.flush().await?;
    Ok(())
}

#[cfg(test)]
#[path = "pipe_tests.rs"]
mod tests;
