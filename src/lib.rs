//! A tiny interactive command interpreter.
//!
//! This crate provides the building blocks of a minimal shell: a whitespace
//! tokenizer, a small set of built-in commands executed in-process, and a
//! launcher that resolves external programs through `PATH` and waits for them
//! to terminate. It is intentionally small and easy to read, suitable for
//! experiments with process management and command dispatch.
//!
//! The main entry point is [`Interpreter`], which owns the environment and an
//! ordered set of pluggable command factories. The public modules [`command`],
//! [`env`] and [`tokenizer`] expose the traits and types needed to implement
//! your own commands or drive the interpreter from another program.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
pub mod tokenizer;

/// Convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::Interpreter;
