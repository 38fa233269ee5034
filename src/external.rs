use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Command that is not a builtin: resolved through PATH and run as a child process.
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: OsString, args: Vec<OsString>) -> Self {
        Self { program, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = env.get_var("PATH")?;
        let executable = resolve_program(OsStr::new(&search_paths), Path::new(name))?;
        Some(Box::new(ExternalCommand::new(
            executable.as_os_str().to_owned(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawns the child with inherited standard streams and blocks until it
    /// terminates. `wait` returns only once the child has exited or been
    /// killed by a signal; a merely stopped child keeps the call blocked.
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let mut child = std::process::Command::new(&self.program)
            .args(&self.args)
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&env.current_dir)
            .spawn()
            .with_context(|| format!("can't launch {}", self.program.to_string_lossy()))?;
        let exit_status = child
            .wait()
            .with_context(|| format!("waiting for {}", self.program.to_string_lossy()))?;
        match exit_status.code() {
            Some(code) => Ok(code),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a program name the way a typical shell would.
///
/// A name containing a path separator (absolute, or relative like `bin/sh` or
/// `./foo`) is checked for existence as-is and never searched. A bare name is
/// looked up in each directory of `search_paths` (a PATH-style list) in order,
/// returning the first existing match. An empty name resolves to nothing.
pub fn resolve_program<'a>(search_paths: &OsStr, name: &'a Path) -> Option<Cow<'a, Path>> {
    if name.as_os_str().is_empty() {
        return None;
    }

    if name.is_absolute() || name.components().nth(1).is_some() {
        return name.exists().then_some(Cow::Borrowed(name));
    }

    find_in_path(search_paths, name.as_os_str()).map(Cow::Owned)
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(cmd))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;
    use std::fs::File;

    #[cfg(unix)]
    fn osstr(s: &str) -> &OsStr {
        OsStr::new(s)
    }

    #[test]
    #[cfg(unix)]
    fn absolute_existing_path_resolves_to_itself() {
        let path = Path::new("/bin/sh");
        let res = resolve_program(osstr("/bin"), path);
        assert!(res.is_some(), "Expected to find /bin/sh via absolute path");
        assert_eq!(res.unwrap().as_ref(), path);
    }

    #[test]
    #[cfg(unix)]
    fn absolute_nonexisting_path_does_not_resolve() {
        let path = Path::new("/bin/nonexisting");
        let res = resolve_program(osstr("/bin"), path);
        assert!(res.is_none());
    }

    #[test]
    #[cfg(unix)]
    fn bare_name_found_via_search_path() {
        let res = resolve_program(osstr("/bin"), Path::new("sh"));
        let found = res.expect("Expected to find 'sh' in /bin via PATH search");
        assert_eq!(found.as_ref(), Path::new("/bin/sh"));
    }

    #[test]
    #[cfg(unix)]
    fn search_path_order_wins() {
        // /bin precedes a directory that can't contain sh.
        let res = resolve_program(osstr("/nonexistent_dir_xyz:/bin"), Path::new("sh"));
        assert_eq!(res.unwrap().as_ref(), Path::new("/bin/sh"));
    }

    #[test]
    #[cfg(unix)]
    fn bare_name_not_found_in_search_path() {
        let res = resolve_program(osstr("/bin"), Path::new("nonexisting"));
        assert!(res.is_none());
    }

    #[test]
    #[cfg(unix)]
    fn relative_multi_component_path_bypasses_search() {
        // Build a nested file bin/sh under a temp dir and resolve it relatively.
        let cwd_before = std::env::current_dir().expect("cwd");
        let tmp_base =
            std::env::temp_dir().join(format!("external_tests_{}_mc", std::process::id()));
        let _ = fs::remove_dir_all(&tmp_base);
        fs::create_dir_all(tmp_base.join("bin")).expect("create temp bin dir");
        File::create(tmp_base.join("bin").join("sh")).expect("touch bin/sh");

        let _lock = crate::testutil::lock_current_dir();
        std::env::set_current_dir(&tmp_base).expect("set cwd");
        let res = resolve_program(osstr("/does/not/matter"), Path::new("bin/sh"))
            .map(|p| p.into_owned());
        // Restore cwd early to avoid interference even on failure
        std::env::set_current_dir(&cwd_before).ok();

        let found = res.expect("Expected to find relative 'bin/sh' in current dir");
        assert!(found.ends_with("bin/sh"));
        let _ = fs::remove_dir_all(tmp_base);
    }

    #[test]
    #[cfg(unix)]
    fn empty_name_does_not_resolve() {
        let res = resolve_program(osstr("/bin"), Path::new(""));
        assert!(res.is_none());
    }
}
