//! # Configuration
//!
//! Startup parameters for the interpreter: the sizes of the program store
//! and call stack, the dialect banner, and the `--debug` flag. There is no
//! config file and no `clap` dependency — the only external input is a
//! single optional command-line flag, and a hand-rolled argv scan says
//! exactly what it does without pulling in a parser built for subcommands,
//! `--help` generation, and shell completions this interpreter has no use
//! for.

pub const DEFAULT_PROGRAM_CAPACITY: usize = 500;
pub const DEFAULT_MAX_LINE_LEN: usize = 127;
pub const DEFAULT_CALL_STACK_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dialect: String,
    pub version: String,
    pub program_capacity: usize,
    pub max_line_len: usize,
    pub call_stack_capacity: usize,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: "core".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            program_capacity: DEFAULT_PROGRAM_CAPACITY,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            call_stack_capacity: DEFAULT_CALL_STACK_CAPACITY,
            debug: false,
        }
    }
}

impl Config {
    /// Scan `args` (typically `std::env::args().skip(1)`) for `--debug`.
    /// Any other argument is ignored rather than rejected — this dialect has
    /// no other flags to typo.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut config = Self::default();
        for arg in args {
            if arg == "--debug" {
                config.debug = true;
            }
        }
        config
    }

    /// The `<K> kbytes Free` figure the banner reports: the program store's
    /// total byte budget, in kilobytes, rounded down.
    pub fn storage_kbytes(&self) -> usize {
        (self.program_capacity * self.max_line_len) / 1024
    }
}
