//! Run policy: which external commands execute a given source file.
//!
//! The table maps a file extension to a stage sequence. Matching is an
//! exact, case-sensitive suffix match on the path string, so `.PY` is
//! unsupported. TODO: decide whether mixed-case extensions should match
//! before this hits Windows users.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One external command: program, arguments, optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// One step of a run request. Stages are built fresh per request and never
/// shared across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Blocking toolchain step. Any bytes on its stderr abort the stages
    /// after it; the check is stderr presence, not exit status.
    Compile(CommandSpec),
    /// Asynchronous stage whose output streams to the console sink.
    Run(CommandSpec),
    /// No subprocess; hand the file to the platform's default handler.
    OpenExternal,
    /// No subprocess; append the message to the console sink.
    Reject(String),
}

/// The ordered stages resolved for one run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub stages: Vec<Stage>,
}

impl RunPlan {
    fn single(stage: Stage) -> Self {
        Self {
            stages: vec![stage],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyKind {
    /// Single run stage through an interpreter binary.
    Interpret,
    /// Compile with javac, then run the class file with java.
    JavaToolchain,
    /// Compile to a native executable, then run it.
    NativeToolchain,
    OpenExternal,
    Reject(&'static str),
}

const CSS_MSG: &str = "CSS files are stylesheets and cannot be executed.";
const UNSUPPORTED_MSG: &str = "Unsupported file format for direct execution.";

/// Extension table. Order is irrelevant; suffixes are disjoint.
const POLICY_TABLE: &[(&str, PolicyKind)] = &[
    (".py", PolicyKind::Interpret),
    (".java", PolicyKind::JavaToolchain),
    (".cpp", PolicyKind::NativeToolchain),
    (".rb", PolicyKind::Interpret),
    (".php", PolicyKind::Interpret),
    (".js", PolicyKind::Interpret),
    (".html", PolicyKind::OpenExternal),
    (".css", PolicyKind::Reject(CSS_MSG)),
];

const DEFAULT_INTERPRETERS: &[(&str, &str)] = &[
    (".py", "python"),
    (".rb", "ruby"),
    (".php", "php"),
    (".js", "node"),
];

/// Resolves a source path to its run plan. Interpreter binaries can be
/// overridden from the config script; the compile toolchain is fixed.
#[derive(Debug, Clone)]
pub struct ExecutionPolicy {
    interpreters: HashMap<String, String>,
}

impl ExecutionPolicy {
    pub fn new() -> Self {
        Self {
            interpreters: DEFAULT_INTERPRETERS
                .iter()
                .map(|(ext, prog)| (ext.to_string(), prog.to_string()))
                .collect(),
        }
    }

    /// Override the interpreter binary for an extension (e.g. ".py" ->
    /// "python3"). Extensions outside the table are ignored.
    pub fn set_interpreter(&mut self, ext: &str, program: &str) {
        if self.interpreters.contains_key(ext) {
            self.interpreters.insert(ext.to_string(), program.to_string());
        }
    }

    pub fn interpreter_for(&self, ext: &str) -> Option<&str> {
        self.interpreters.get(ext).map(String::as_str)
    }

    /// Build the stage sequence for a path. The file is not checked for
    /// existence or readability; the spawn itself reports those failures.
    pub fn plan_for(&self, path: &Path) -> RunPlan {
        let raw = path.to_string_lossy();

        for (ext, kind) in POLICY_TABLE {
            if !raw.ends_with(ext) {
                continue;
            }
            return match kind {
                PolicyKind::Interpret => {
                    let program = self
                        .interpreter_for(ext)
                        .unwrap_or(ext.trim_start_matches('.'));
                    RunPlan::single(Stage::Run(CommandSpec::new(program).arg(raw.as_ref())))
                }
                PolicyKind::JavaToolchain => self.java_plan(path, &raw),
                PolicyKind::NativeToolchain => self.native_plan(&raw, ext),
                PolicyKind::OpenExternal => RunPlan::single(Stage::OpenExternal),
                PolicyKind::Reject(msg) => RunPlan::single(Stage::Reject(msg.to_string())),
            };
        }

        RunPlan::single(Stage::Reject(UNSUPPORTED_MSG.to_string()))
    }

    fn java_plan(&self, path: &Path, raw: &str) -> RunPlan {
        let class_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
            _ => ".".to_string(),
        };
        let class_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        RunPlan {
            stages: vec![
                Stage::Compile(CommandSpec::new("javac").arg(raw)),
                Stage::Run(
                    CommandSpec::new("java")
                        .arg("-cp")
                        .arg(class_dir)
                        .arg(class_name),
                ),
            ],
        }
    }

    fn native_plan(&self, raw: &str, ext: &str) -> RunPlan {
        // Executable named as the source path with its extension removed.
        let executable = raw.strip_suffix(ext).unwrap_or(raw).to_string();

        RunPlan {
            stages: vec![
                Stage::Compile(
                    CommandSpec::new("g++")
                        .arg(raw)
                        .arg("-o")
                        .arg(&executable),
                ),
                Stage::Run(CommandSpec::new(executable)),
            ],
        }
    }
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self::new()
    }
}
