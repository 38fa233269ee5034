use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Mutable, user-level view of the process environment used by the interpreter.
///
/// The environment contains:
/// - `vars`: a map of environment variables that will be visible to executed commands.
/// - `current_dir`: the working directory for command execution.
///
/// The working directory is mutated only by the `cd` built-in, which also
/// changes the process-wide directory so that spawned children inherit it.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<String, String>,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    ///
    /// Copies variables from `std::env::vars()` and initializes `current_dir`
    /// from `std::env::current_dir()`.
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        for (k, v) in stdenv::vars() {
            vars.insert(k, v);
        }
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, current_dir }
    }

    /// Get the value of an environment variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to `std::env::var`.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .cloned()
            .or_else(|| stdenv::var(key).ok())
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_var_overrides_and_get_var_reads_back() {
        let mut env = Environment {
            vars: HashMap::new(),
            current_dir: stdenv::current_dir().unwrap(),
        };

        let missing = format!("MINISHELL_UNSET_VAR_{}", std::process::id());
        assert_eq!(env.get_var(&missing), None);

        env.set_var("MINISHELL_GREETING", "hello");
        assert_eq!(
            env.get_var("MINISHELL_GREETING"),
            Some("hello".to_string())
        );

        // A later set wins.
        env.set_var("MINISHELL_GREETING", "goodbye");
        assert_eq!(
            env.get_var("MINISHELL_GREETING"),
            Some("goodbye".to_string())
        );
    }

    #[test]
    fn new_captures_process_variables_and_directory() {
        let _lock = crate::testutil::lock_current_dir();
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
        assert_eq!(env.current_dir, stdenv::current_dir().unwrap());
    }

    #[test]
    fn default_matches_new() {
        let _lock = crate::testutil::lock_current_dir();
        let env = Environment::default();
        assert_eq!(env.current_dir, stdenv::current_dir().unwrap());
        assert!(env.get_var("PATH").is_some());
    }
}
