//! # Console I/O
//!
//! All interaction with the outside world — the terminal, `LPRINT`'s
//! printer-emulation file, and `SAVE`/`LOAD`'s program files — goes through
//! this trait. The interpreter itself never touches `std::io` or
//! `std::fs` directly, which is what lets `process_input_line` run under
//! test without a real terminal, mirroring the provide-input /
//! capture-output split a BASIC interpreter's own test harness uses.

use std::fs;
use std::io::{self, BufRead, Write};

use crate::error::{BasicError, ErrorKind};

pub trait ConsoleIO {
    fn print(&mut self, text: &str);

    /// Blocking read of one line from the input device. `None` signals
    /// end-of-input (Ctrl-D / Ctrl-Z), which the REPL treats as `SYSTEM`.
    fn read_line(&mut self) -> Option<String>;

    /// Sound the bell — `BEEP` rings the terminal bell (`\x07`) rather than
    /// printing visible text.
    fn bell(&mut self);

    /// Append a line to the printer-emulation output. Opens `lprint.out` the
    /// first time it is called and keeps it open for the run.
    fn lprint(&mut self, text: &str) -> Result<(), BasicError>;

    fn save_program(&mut self, filename: &str, contents: &str) -> Result<(), BasicError>;
    fn load_program(&mut self, filename: &str) -> Result<String, BasicError>;
}

/// The real terminal-backed implementation: stdin/stdout plus the
/// filesystem for `LPRINT`, `SAVE`, and `LOAD`.
pub struct StdConsoleIO {
    stdin: io::Stdin,
    lprint_file: Option<fs::File>,
}

impl StdConsoleIO {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            lprint_file: None,
        }
    }
}

impl Default for StdConsoleIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleIO for StdConsoleIO {
    fn print(&mut self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let mut lock = self.stdin.lock();
        match lock.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            Err(_) => None,
        }
    }

    fn bell(&mut self) {
        print!("\x07");
        let _ = io::stdout().flush();
    }

    fn lprint(&mut self, text: &str) -> Result<(), BasicError> {
        if self.lprint_file.is_none() {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("lprint.out")
                .map_err(|_| BasicError::new(ErrorKind::CouldNotOpenLprintFile))?;
            self.lprint_file = Some(file);
        }
        let file = self.lprint_file.as_mut().unwrap();
        writeln!(file, "{}", text).map_err(|_| BasicError::new(ErrorKind::CouldNotOpenLprintFile))
    }

    fn save_program(&mut self, filename: &str, contents: &str) -> Result<(), BasicError> {
        fs::write(filename, contents).map_err(|_| BasicError::new(ErrorKind::CannotOpenFile))
    }

    fn load_program(&mut self, filename: &str) -> Result<String, BasicError> {
        fs::read_to_string(filename).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BasicError::new(ErrorKind::FileNotFound)
            } else {
                BasicError::new(ErrorKind::CannotOpenFile)
            }
        })
    }
}

/// An in-memory double for tests: queues input lines, captures everything
/// printed, and keeps `LPRINT`/`SAVE`/`LOAD` in maps instead of on disk.
/// Compiled unconditionally (not behind `#[cfg(test)]`) so integration
/// tests in other files can use it too.
pub struct MockConsoleIO {
    pending_input: std::collections::VecDeque<String>,
    output: String,
    bell_count: usize,
    lprint_output: String,
    files: std::collections::HashMap<String, String>,
}

impl MockConsoleIO {
    pub fn new() -> Self {
        Self {
            pending_input: std::collections::VecDeque::new(),
            output: String::new(),
            bell_count: 0,
            lprint_output: String::new(),
            files: std::collections::HashMap::new(),
        }
    }

    pub fn provide_input(&mut self, line: &str) {
        self.pending_input.push_back(line.to_string());
    }

    pub fn provide_lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.provide_input(line);
        }
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn output_so_far(&self) -> &str {
        &self.output
    }

    pub fn bell_count(&self) -> usize {
        self.bell_count
    }

    pub fn lprint_output(&self) -> &str {
        &self.lprint_output
    }

    pub fn preload_file(&mut self, filename: &str, contents: &str) {
        self.files.insert(filename.to_string(), contents.to_string());
    }
}

impl Default for MockConsoleIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleIO for MockConsoleIO {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn read_line(&mut self) -> Option<String> {
        self.pending_input.pop_front()
    }

    fn bell(&mut self) {
        self.bell_count += 1;
    }

    fn lprint(&mut self, text: &str) -> Result<(), BasicError> {
        self.lprint_output.push_str(text);
        self.lprint_output.push('\n');
        Ok(())
    }

    fn save_program(&mut self, filename: &str, contents: &str) -> Result<(), BasicError> {
        self.files.insert(filename.to_string(), contents.to_string());
        Ok(())
    }

    fn load_program(&mut self, filename: &str) -> Result<String, BasicError> {
        self.files
            .get(filename)
            .cloned()
            .ok_or_else(|| BasicError::new(ErrorKind::FileNotFound))
    }
}
