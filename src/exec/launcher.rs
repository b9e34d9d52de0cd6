//! External process launching.
//!
//! Everything that touches the OS process layer goes through the
//! [`ProcessLauncher`] trait so the orchestrator and terminal session can be
//! exercised against a fake without a real toolchain installed.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tokio::sync::mpsc::UnboundedSender;

use super::policy::CommandSpec;

/// Notifications from the tracked asynchronous process. Reader threads only
/// send these; the main event loop is the sole consumer, so every buffer
/// mutation happens on the owning task.
#[derive(Debug)]
pub enum ExecEvent {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
    Exited,
}

/// Collected output of a blocking command. Exit status is deliberately not
/// carried: compile stages gate on stderr presence, not status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completed {
    pub stdout: String,
    pub stderr: String,
}

/// The writable side and liveness of the tracked asynchronous process. At
/// most one handle is current at a time; replacing it abandons the old
/// process without killing it.
pub struct ProcessHandle {
    input: Box<dyn Write + Send>,
    running: Arc<AtomicBool>,
}

impl ProcessHandle {
    pub fn new(input: Box<dyn Write + Send>, running: Arc<AtomicBool>) -> Self {
        Self { input, running }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Write `line` plus a newline to the process input stream.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.input.write_all(line.as_bytes())?;
        self.input.write_all(b"\n")?;
        self.input.flush()
    }
}

pub trait ProcessLauncher: Send {
    /// Start a process whose output streams as [`ExecEvent`]s on `events`.
    fn spawn(
        &self,
        cmd: &CommandSpec,
        events: UnboundedSender<ExecEvent>,
    ) -> io::Result<ProcessHandle>;

    /// Start a process and block until it exits.
    fn run_blocking(&self, cmd: &CommandSpec) -> io::Result<Completed>;

    /// Run a line through the system shell, blocking until it exits.
    fn run_shell(&self, line: &str, cwd: &Path) -> io::Result<Completed>;

    /// Hand a file path or URL to the platform's default handler.
    fn open_external(&self, target: &str) -> io::Result<()>;
}

/// The real launcher, backed by `std::process`.
pub struct SystemLauncher;

impl SystemLauncher {
    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn shell_command(line: &str) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", line]);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", line]);
            cmd
        }
    }

    fn missing_pipe(which: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::BrokenPipe,
            format!("child {} unavailable", which),
        )
    }
}

impl ProcessLauncher for SystemLauncher {
    fn spawn(
        &self,
        cmd: &CommandSpec,
        events: UnboundedSender<ExecEvent>,
    ) -> io::Result<ProcessHandle> {
        let mut child = Self::command(cmd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take().ok_or_else(|| Self::missing_pipe("stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Self::missing_pipe("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Self::missing_pipe("stderr"))?;

        pump(stdout, events.clone(), ExecEvent::Stdout);
        pump(stderr, events.clone(), ExecEvent::Stderr);

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        thread::spawn(move || {
            let _ = child.wait();
            flag.store(false, Ordering::SeqCst);
            let _ = events.send(ExecEvent::Exited);
        });

        Ok(ProcessHandle::new(Box::new(stdin), running))
    }

    fn run_blocking(&self, cmd: &CommandSpec) -> io::Result<Completed> {
        let output = Self::command(cmd).output()?;
        Ok(Completed {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_shell(&self, line: &str, cwd: &Path) -> io::Result<Completed> {
        let output = Self::shell_command(line).current_dir(cwd).output()?;
        Ok(Completed {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn open_external(&self, target: &str) -> io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut cmd = {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        };
        #[cfg(target_os = "windows")]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", target]);
            cmd
        };
        #[cfg(all(unix, not(target_os = "macos")))]
        let mut cmd = {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        };

        // Fire and forget; the handler owns its own lifetime.
        cmd.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
        Ok(())
    }
}

/// Forward byte chunks from a child stream to the event channel until EOF.
fn pump<R, F>(mut reader: R, events: UnboundedSender<ExecEvent>, wrap: F)
where
    R: Read + Send + 'static,
    F: Fn(Vec<u8>) -> ExecEvent + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if events.send(wrap(buf[..n].to_vec())).is_err() {
                        break;
                    }
                }
            }
        }
    });
}
