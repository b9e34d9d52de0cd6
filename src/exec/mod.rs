pub mod console;
pub mod git;
pub mod launcher;
pub mod orchestrator;
pub mod policy;
pub mod terminal;

pub use console::{ConsoleSink, TerminalBuffer};
pub use launcher::{Completed, ExecEvent, ProcessHandle, ProcessLauncher, SystemLauncher};
pub use orchestrator::Orchestrator;
pub use policy::{CommandSpec, ExecutionPolicy, RunPlan, Stage};
pub use terminal::{SubmitOutcome, submit_line};
