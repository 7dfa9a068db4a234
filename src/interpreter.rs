//! # Interpreter & Execution Loop
//!
//! Bundles the pieces a running session needs — the environment, the
//! program store, configuration, I/O, and the module hook — and drives
//! `RUN`'s execution loop. This is also where the `Mode` guard lives:
//! `RUN`/`LIST`/`NEW`/`SAVE`/`LOAD` are allowed in direct mode
//! unconditionally and forbidden while a stored program is executing, full
//! stop.

use crate::config::Config;
use crate::cursor::Cursor;
use crate::dispatcher;
use crate::environment::Environment;
use crate::error::BasicError;
use crate::io::ConsoleIO;
use crate::module_hook::{ModuleHook, StubModuleHook};
use crate::program::ProgramStore;

/// Whether the interpreter is executing a single typed-in statement or
/// driving the stored program via `RUN`. An explicit flag rather than
/// inferring mode from `program_counter > 0`, which breaks as soon as a
/// program branches back to line zero's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Direct,
    Program,
}

pub struct Interpreter<IO: ConsoleIO> {
    pub(crate) env: Environment,
    pub(crate) store: ProgramStore,
    pub(crate) config: Config,
    /// Public so callers that construct an `Interpreter<MockConsoleIO>` in
    /// tests can feed input and inspect captured output directly.
    pub io: IO,
    pub(crate) module_hook: Box<dyn ModuleHook>,
    pub(crate) mode: Mode,
    pub(crate) should_exit_process: bool,
}

impl<IO: ConsoleIO> Interpreter<IO> {
    pub fn new(config: Config, io: IO) -> Self {
        let call_stack_capacity = config.call_stack_capacity;
        let program_capacity = config.program_capacity;
        let max_line_len = config.max_line_len;
        Self {
            env: Environment::new(call_stack_capacity),
            store: ProgramStore::new(program_capacity, max_line_len),
            config,
            io,
            module_hook: Box::new(StubModuleHook),
            mode: Mode::Direct,
            should_exit_process: false,
        }
    }

    pub fn with_module_hook(mut self, hook: Box<dyn ModuleHook>) -> Self {
        self.module_hook = hook;
        self
    }

    pub fn should_exit_process(&self) -> bool {
        self.should_exit_process
    }

    pub(crate) fn trace(&mut self, message: &str) {
        if self.config.debug {
            let line = format!("[DEBUG] {}\n", message);
            self.io.print(&line);
        }
    }

    /// `NEW`: clears the program store and resets the environment. Does not
    /// touch `mode` or `running` — callers outside a guard never call this
    /// mid-program anyway.
    pub(crate) fn new_program(&mut self) {
        self.store.clear();
        self.env.reset();
    }

    /// The `RUN` execution loop: reset state, then step the program counter
    /// across the sorted store, honoring branches, until `running` clears
    /// or the store is exhausted. If a statement does not branch, the next
    /// stored line runs next — an `IF` whose condition is false simply
    /// falls through this way, same as any other non-branching statement.
    /// A statement error stops the program and propagates to the caller
    /// rather than being reported here — `process_input_line` is the single
    /// place that writes the BEL/`ERROR:` line, so a failing `RUN` never
    /// also prints `OK`.
    pub(crate) fn run_program(&mut self) -> Result<(), BasicError> {
        self.env.reset();
        self.env.running = true;
        self.mode = Mode::Program;

        let result = (|| {
            while self.env.running && self.env.program_counter < self.store.len() {
                let prev_pc = self.env.program_counter;
                let text = self
                    .store
                    .get(prev_pc)
                    .expect("program_counter is always in range inside the loop")
                    .text
                    .clone();

                self.trace(&format!("RUN pc={} : {}", prev_pc, text));

                let mut cursor = Cursor::new(&text);
                dispatcher::dispatch(&mut cursor, self)?;

                if self.should_exit_process {
                    break;
                }

                if self.env.running && self.env.program_counter == prev_pc {
                    self.env.program_counter += 1;
                }
            }
            Ok(())
        })();

        self.env.running = false;
        self.mode = Mode::Direct;
        result
    }

    /// Sounds the bell then writes `ERROR: <MESSAGE>` — the one wire
    /// contract every error path (direct mode and program mode) shares.
    pub(crate) fn report_error(&mut self, err: &BasicError) {
        self.io.bell();
        self.io.print(&format!("ERROR: {}\n", err.kind.message()));
    }

    /// The REPL-facing entry point: classify `raw_line` as a stored-line
    /// edit or a direct-mode statement, execute it, and write exactly the
    /// OK/READY/ERROR+READY contract — no `> ` prompt, which belongs to the
    /// outer blocking loop in `repl::run`.
    pub fn process_input_line(&mut self, raw_line: &str) {
        let trimmed_start = raw_line.trim_start();

        if trimmed_start.is_empty() {
            self.io.print("READY\n");
            return;
        }

        if trimmed_start.chars().next().unwrap().is_ascii_digit() {
            self.handle_line_edit(trimmed_start);
            return;
        }

        self.mode = Mode::Direct;
        self.env.running = true;
        let mut cursor = Cursor::new(trimmed_start);

        match dispatcher::dispatch(&mut cursor, self) {
            Ok(()) => {
                self.env.running = false;
                if self.should_exit_process {
                    return;
                }
                self.io.print("OK\n");
                self.io.print("READY\n");
            }
            Err(err) => {
                self.env.running = false;
                self.report_error(&err);
                self.io.print("READY\n");
            }
        }
    }

    fn handle_line_edit(&mut self, trimmed_start: &str) {
        let mut cursor = Cursor::new(trimmed_start);
        let n = match cursor.read_line_number() {
            Ok(n) => n,
            Err(err) => {
                self.report_error(&err);
                self.io.print("READY\n");
                return;
            }
        };
        cursor.skip_ws();
        let text = cursor.remaining();
        match self.store.upsert(n, text) {
            Ok(()) => self.io.print("READY\n"),
            Err(err) => {
                self.report_error(&err);
                self.io.print("READY\n");
            }
        }
    }

    /// Prints the startup banner: dialect/version line, the
    /// storage-capacity line, and the first `READY`.
    pub fn print_banner(&mut self) {
        let line = format!(
            "BASIC++ ({}) v{}\n{} kbytes Free\nREADY\n",
            self.config.dialect,
            self.config.version,
            self.config.storage_kbytes()
        );
        self.io.print(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MockConsoleIO;

    fn interp() -> Interpreter<MockConsoleIO> {
        Interpreter::new(Config::default(), MockConsoleIO::new())
    }

    #[test]
    fn direct_mode_arithmetic_and_precedence() {
        let mut interp = interp();
        interp.process_input_line("PRINT 3+4*5");
        interp.process_input_line("PRINT 3+(4*5)");
        assert_eq!(interp.io.take_output(), "35\nOK\nREADY\n23\nOK\nREADY\n");
    }

    #[test]
    fn store_list_and_run() {
        let mut interp = interp();
        interp.process_input_line("10 LET A=5");
        interp.process_input_line("20 LET B=A*2");
        interp.process_input_line("30 PRINT B");
        interp.io.take_output();
        interp.process_input_line("LIST");
        assert_eq!(
            interp.io.take_output(),
            "10 LET A=5\n20 LET B=A*2\n30 PRINT B\nOK\nREADY\n"
        );
        interp.process_input_line("RUN");
        assert_eq!(interp.io.take_output(), "10\nOK\nREADY\n");
    }

    #[test]
    fn gosub_return_with_counter() {
        let mut interp = interp();
        for line in [
            "10 LET A=0",
            "20 GOSUB 100",
            "30 PRINT A",
            "40 END",
            "100 LET A=A+1",
            "110 RETURN",
        ] {
            interp.process_input_line(line);
        }
        interp.io.take_output();
        interp.process_input_line("RUN");
        assert_eq!(interp.io.take_output(), "1\nOK\nREADY\n");
    }

    #[test]
    fn if_false_falls_through_to_next_stored_line() {
        // Once A reaches 3 the IF is false and does not branch, so the loop
        // falls through to line 30 same as it would for any non-branching
        // statement — ordinary IF/GOTO fallthrough, not a no-op.
        let mut interp = interp();
        for line in [
            "10 LET A=1",
            "20 IF A<3 THEN 50",
            "30 PRINT 99",
            "40 END",
            "50 LET A=A+1",
            "60 GOTO 20",
        ] {
            interp.process_input_line(line);
        }
        interp.io.take_output();
        interp.process_input_line("RUN");
        assert!(interp.io.take_output().contains("99"));
    }

    #[test]
    fn wraparound_and_division_scenario() {
        let mut interp = interp();
        interp.process_input_line("PRINT 127+1");
        interp.process_input_line("PRINT -128-1");
        interp.process_input_line("PRINT 7/3");
        interp.process_input_line("PRINT 10/0");
        assert_eq!(
            interp.io.take_output(),
            "-128\nOK\nREADY\n127\nOK\nREADY\n2\nOK\nREADY\nERROR: DIVISION BY ZERO\nREADY\n"
        );
        assert_eq!(interp.io.bell_count(), 1);
    }

    #[test]
    fn editing_empty_text_deletes_the_line() {
        let mut interp = interp();
        interp.process_input_line("10 PRINT 1");
        interp.process_input_line("20 PRINT 2");
        interp.process_input_line("10");
        interp.io.take_output();
        interp.process_input_line("LIST");
        assert_eq!(interp.io.take_output(), "20 PRINT 2\nOK\nREADY\n");
    }

    #[test]
    fn run_guards_reject_in_program_mode() {
        let mut interp = interp();
        interp.process_input_line("10 RUN");
        interp.io.take_output();
        interp.process_input_line("RUN");
        assert_eq!(
            interp.io.take_output(),
            "ERROR: CAN'T USE RUN IN A PROGRAM\nREADY\n"
        );
    }

    #[test]
    fn blank_line_just_prints_ready() {
        let mut interp = interp();
        interp.process_input_line("");
        assert_eq!(interp.io.take_output(), "READY\n");
    }
}
