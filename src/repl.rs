//! # REPL Frontend
//!
//! The thin, deliberately narrow blocking loop around the engine: print the
//! `> ` prompt, block on one line of input, hand it to
//! [`Interpreter::process_input_line`], repeat. End-of-input exits with
//! status 0, matching `QUIT`/`EXIT`.
//!
//! Deliberately not covered by the test suite — everything worth asserting
//! about the REPL's output contract lives in `process_input_line` itself
//! (see `src/interpreter.rs`), which this loop does not alter.

use crate::interpreter::Interpreter;
use crate::io::ConsoleIO;

pub fn run<IO: ConsoleIO>(mut interp: Interpreter<IO>) {
    loop {
        interp.io.print("> ");
        match interp.io.read_line() {
            None => std::process::exit(0),
            Some(line) => {
                interp.process_input_line(&line);
                if interp.should_exit_process() {
                    std::process::exit(0);
                }
            }
        }
    }
}
