//! Git menu actions: each one is a blocking one-shot `git` invocation whose
//! combined output the caller appends to the console.

use std::io;
use std::path::Path;

use super::launcher::{Completed, ProcessLauncher};
use super::policy::CommandSpec;

pub fn commit(
    launcher: &dyn ProcessLauncher,
    repo: &Path,
    message: &str,
) -> io::Result<Completed> {
    run_git(launcher, repo, &["commit", "-am", message])
}

pub fn push(launcher: &dyn ProcessLauncher, repo: &Path) -> io::Result<Completed> {
    run_git(launcher, repo, &["push"])
}

pub fn pull(launcher: &dyn ProcessLauncher, repo: &Path) -> io::Result<Completed> {
    run_git(launcher, repo, &["pull"])
}

fn run_git(
    launcher: &dyn ProcessLauncher,
    repo: &Path,
    args: &[&str],
) -> io::Result<Completed> {
    let mut cmd = CommandSpec::new("git").current_dir(repo);
    for arg in args {
        cmd = cmd.arg(*arg);
    }
    launcher.run_blocking(&cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::launcher::fake::FakeLauncher;

    #[test]
    fn commit_passes_the_message_to_git() {
        let launcher = FakeLauncher::new();
        commit(&launcher, Path::new("/repo"), "fix terminal focus").unwrap();

        let blocked = launcher.blocked.lock().unwrap();
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].program, "git");
        assert_eq!(blocked[0].args, vec!["commit", "-am", "fix terminal focus"]);
        assert_eq!(blocked[0].cwd.as_deref(), Some(Path::new("/repo")));
    }

    #[test]
    fn push_and_pull_are_plain_subcommands() {
        let launcher = FakeLauncher::new();
        push(&launcher, Path::new("/repo")).unwrap();
        pull(&launcher, Path::new("/repo")).unwrap();

        let blocked = launcher.blocked.lock().unwrap();
        assert_eq!(blocked[0].args, vec!["push"]);
        assert_eq!(blocked[1].args, vec!["pull"]);
    }
}
