//! The terminal session: one line at a time, multiplexed with the tracked
//! process.
//!
//! On submit, the last line of the terminal buffer either feeds the running
//! process's stdin or runs as a fresh one-shot shell command whose output
//! lands back in the terminal buffer.

use std::path::Path;

use super::console::TerminalBuffer;
use super::launcher::{ProcessHandle, ProcessLauncher};

/// What a line submit did, so the caller can decide which tab to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The line was written to the running process's input stream.
    Forwarded,
    /// The line ran as an independent one-shot shell command.
    RanCommand,
    /// The pending command line was empty; nothing happened.
    Ignored,
}

/// Handle a line-submit event on the terminal buffer.
///
/// The typed line is never cleared - the buffer is append-only scrollback.
/// One-shot output goes to the terminal buffer only, never the console.
pub fn submit_line(
    terminal: &mut TerminalBuffer,
    current: Option<&mut ProcessHandle>,
    launcher: &dyn ProcessLauncher,
    cwd: &Path,
) -> SubmitOutcome {
    let line = terminal.last_line().to_string();
    if line.is_empty() {
        return SubmitOutcome::Ignored;
    }

    if let Some(handle) = current {
        if handle.is_running() {
            if let Err(e) = handle.write_line(&line) {
                terminal.append_block(&format!("Failed to write to process: {}", e));
            }
            return SubmitOutcome::Forwarded;
        }
    }

    match launcher.run_shell(&line, cwd) {
        Ok(done) => {
            terminal.append_block(&format!("{}{}", done.stdout, done.stderr));
        }
        Err(e) => {
            terminal.append_block(&format!("Failed to run command: {}", e));
        }
    }
    SubmitOutcome::RanCommand
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::launcher::Completed;
    use crate::exec::launcher::fake::{FakeLauncher, SharedInput};
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    fn typed(text: &str) -> TerminalBuffer {
        let mut term = TerminalBuffer::new();
        for ch in text.chars() {
            term.insert_char(ch);
        }
        term
    }

    #[test]
    fn forwards_line_plus_newline_to_running_process() {
        let sink = SharedInput::default();
        let mut handle =
            ProcessHandle::new(Box::new(sink.clone()), Arc::new(AtomicBool::new(true)));
        let launcher = FakeLauncher::new();
        let mut term = typed("42");

        let outcome = submit_line(&mut term, Some(&mut handle), &launcher, Path::new("."));

        assert_eq!(outcome, SubmitOutcome::Forwarded);
        assert_eq!(sink.contents(), b"42\n");
        // No separate shell command, and the typed line stays put.
        assert!(launcher.shell_lines.lock().unwrap().is_empty());
        assert_eq!(term.text(), "42");
    }

    #[test]
    fn runs_one_shot_command_when_no_process_is_tracked() {
        let launcher = FakeLauncher::new();
        launcher.script_shell(Completed {
            stdout: "file_a\n".to_string(),
            stderr: String::new(),
        });
        let mut term = typed("ls");

        let outcome = submit_line(&mut term, None, &launcher, Path::new("/project"));

        assert_eq!(outcome, SubmitOutcome::RanCommand);
        assert_eq!(launcher.shell_lines.lock().unwrap().as_slice(), ["ls"]);
        assert_eq!(term.text(), "ls\nfile_a\n");
    }

    #[test]
    fn exited_process_falls_back_to_one_shot_command() {
        let mut handle = ProcessHandle::new(
            Box::new(SharedInput::default()),
            Arc::new(AtomicBool::new(false)),
        );
        let launcher = FakeLauncher::new();
        let mut term = typed("pwd");

        let outcome = submit_line(&mut term, Some(&mut handle), &launcher, Path::new("."));

        assert_eq!(outcome, SubmitOutcome::RanCommand);
        assert_eq!(launcher.shell_lines.lock().unwrap().as_slice(), ["pwd"]);
    }

    #[test]
    fn one_shot_stderr_lands_in_the_terminal_buffer() {
        let launcher = FakeLauncher::new();
        launcher.script_shell(Completed {
            stdout: String::new(),
            stderr: "no such command\n".to_string(),
        });
        let mut term = typed("frobnicate");

        submit_line(&mut term, None, &launcher, Path::new("."));

        assert!(term.text().contains("no such command"));
    }

    #[test]
    fn empty_buffer_submit_is_ignored() {
        let launcher = FakeLauncher::new();
        let mut term = TerminalBuffer::new();

        let outcome = submit_line(&mut term, None, &launcher, Path::new("."));

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(launcher.shell_lines.lock().unwrap().is_empty());
        assert!(term.is_empty());
    }
}
