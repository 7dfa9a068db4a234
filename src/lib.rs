//! # IB Core BASIC
//!
//! An interpreter for a minimal, line-numbered BASIC dialect built for
//! constrained environments: 8-bit two's-complement arithmetic, 26 global
//! variables, a sorted in-memory program store, and a statement dispatcher
//! driven by a single program counter.
//!
//! ## Pipeline
//!
//! A line typed at the REPL goes through two stages:
//!
//! 1. **Classification** — a leading digit means "edit the program store
//!    at this line number"; anything else is a direct-mode statement.
//! 2. **Dispatch** — [`dispatcher::dispatch`] reads the statement's leading
//!    keyword and executes it against the shared [`interpreter::Interpreter`]
//!    (environment, program store, I/O).
//!
//! `RUN` drives the same dispatcher across the stored program, one line at
//! a time, via [`interpreter::Interpreter::run_program`].
//!
//! ## Example
//!
//! ```rust
//! use ib_core_basic::config::Config;
//! use ib_core_basic::interpreter::Interpreter;
//! use ib_core_basic::io::MockConsoleIO;
//!
//! let mut interp = Interpreter::new(Config::default(), MockConsoleIO::new());
//! interp.process_input_line("PRINT 3+4*5");
//! ```

pub mod config;
pub mod cursor;
pub mod dispatcher;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod io;
pub mod module_hook;
pub mod program;
pub mod repl;
pub mod value;
