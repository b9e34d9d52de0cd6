//! Process orchestration: translate "run this file" into external process
//! stages and relay their output into the console sink.

use std::path::Path;

use tokio::sync::mpsc::UnboundedSender;

use super::console::ConsoleSink;
use super::launcher::{ExecEvent, ProcessHandle, ProcessLauncher};
use super::policy::{ExecutionPolicy, Stage};

/// Owns the policy table, the launcher, and the single "current process"
/// slot shared with the terminal session.
pub struct Orchestrator {
    policy: ExecutionPolicy,
    launcher: Box<dyn ProcessLauncher>,
    events: UnboundedSender<ExecEvent>,
    current: Option<ProcessHandle>,
}

impl Orchestrator {
    pub fn new(
        policy: ExecutionPolicy,
        launcher: Box<dyn ProcessLauncher>,
        events: UnboundedSender<ExecEvent>,
    ) -> Self {
        Self {
            policy,
            launcher,
            events,
            current: None,
        }
    }

    pub fn launcher(&self) -> &dyn ProcessLauncher {
        &*self.launcher
    }

    /// True when a tracked process is still running.
    pub fn has_running_process(&self) -> bool {
        self.current.as_ref().is_some_and(ProcessHandle::is_running)
    }

    /// Split borrows for the terminal session: the current-handle slot and
    /// the launcher, without giving out the whole orchestrator.
    pub fn parts_mut(&mut self) -> (Option<&mut ProcessHandle>, &dyn ProcessLauncher) {
        (self.current.as_mut(), &*self.launcher)
    }

    /// Resolve the stage sequence for `path` and dispatch it.
    ///
    /// The previously tracked process, if any, is abandoned first, never
    /// killed; it keeps running unobserved. A compile stage that writes
    /// anything to stderr aborts the stages after it and surfaces the text
    /// verbatim. Every launch failure becomes console text, never an error
    /// return.
    pub fn run_file(&mut self, path: &Path, console: &mut ConsoleSink) {
        self.current = None;

        let plan = self.policy.plan_for(path);
        for stage in plan.stages {
            match stage {
                Stage::Reject(msg) => {
                    console.append_line(&msg);
                    return;
                }
                Stage::OpenExternal => {
                    let target = path.to_string_lossy();
                    match self.launcher.open_external(&target) {
                        Ok(()) => console.append_line(&format!(
                            "Opened {} with the system default handler.",
                            path.display()
                        )),
                        Err(e) => console.append_line(&format!(
                            "Failed to open {}: {}",
                            path.display(),
                            e
                        )),
                    }
                }
                Stage::Compile(cmd) => match self.launcher.run_blocking(&cmd) {
                    Ok(done) => {
                        if !done.stderr.is_empty() {
                            // Stderr presence, not exit status: a compiler
                            // that only warns still aborts the run stage.
                            console.append(&done.stderr);
                            return;
                        }
                    }
                    Err(e) => {
                        console.append_line(&format!("Failed to run {}: {}", cmd.program, e));
                        return;
                    }
                },
                Stage::Run(cmd) => match self.launcher.spawn(&cmd, self.events.clone()) {
                    Ok(handle) => self.current = Some(handle),
                    Err(e) => {
                        console.append_line(&format!("Failed to run {}: {}", cmd.program, e));
                    }
                },
            }
        }
    }

    /// Apply one process event on the owning task: decode and append output
    /// chunks, drop the handle when the process exits.
    pub fn handle_event(&mut self, event: ExecEvent, console: &mut ConsoleSink) {
        match event {
            ExecEvent::Stdout(bytes) | ExecEvent::Stderr(bytes) => {
                console.append(&String::from_utf8_lossy(&bytes));
            }
            ExecEvent::Exited => {
                self.current = None;
            }
        }
    }
}
