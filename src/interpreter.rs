use crate::command::{CommandFactory, ExitCode};
use crate::env::Environment;
use crate::tokenizer;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const PROMPT: &str = "> ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter maintains an [`Environment`] and a list of [`CommandFactory`]
/// objects that are queried in order to create commands by name. The list is
/// built once at startup and never changes afterwards. See [`Default`] for the
/// factories included out of the box.
///
/// Example
/// ```
/// use minishell::Interpreter;
/// let mut sh = Interpreter::default();
/// let code = sh.run(&["help".to_string()]).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Execute one tokenized command line.
    ///
    /// An empty token sequence is a no-op: a notice is printed and success is
    /// returned. Otherwise the first token selects the command — an exact,
    /// case-sensitive match against the built-ins, falling back to a PATH
    /// lookup — and the remaining tokens become its arguments.
    ///
    /// Returns the command's exit code, or an error if the name cannot be
    /// resolved or the command fails to start.
    pub fn run(&mut self, tokens: &[String]) -> Result<ExitCode> {
        let Some((name, rest)) = tokens.split_first() else {
            println!("Empty command entered, please enter your input...");
            return Ok(0);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                return cmd.execute(&mut std::io::stdout(), &mut self.env);
            }
        }
        Err(anyhow::anyhow!("command not found: {name}"))
    }

    /// The interactive Read-Eval-Print Loop.
    ///
    /// Reads one line at a time, tokenizes it and runs it. Command failures
    /// are reported and the loop continues; the loop itself stops only on end
    /// of input (returned as success) or an unrecoverable read error
    /// (returned as the error). The `exit` builtin terminates the process
    /// directly and never comes back here.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    let tokens = tokenizer::tokenize(&line);
                    if let Err(err) = self.run(&tokens) {
                        eprintln!("minishell: {err:#}");
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C drops the current line, not the shell.
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    eprintln!("EOF reached, exiting");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-ins: `cd`, `help`, `exit`
    /// - external command launcher
    fn default() -> Self {
        use crate::builtin::{Cd, Exit, Help};
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
