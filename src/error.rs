//! # Error Model
//!
//! A single tagged error type carrying one of the fixed message constants
//! from the language's error contract. Every error kind maps to exactly one
//! uppercase message string; that string, not the `ErrorKind` variant name,
//! is the wire contract the REPL and any caller of the library sees.

use std::fmt;

/// Every error the interpreter can raise, grouped the way the dialect's
/// error contract groups them: syntax, runtime, editor, mode, and I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Syntax
    UnknownCommand,
    ExpectedNumber,
    InvalidNumber,
    ExpectedCloseParen,
    UnterminatedString,
    ExpectedVariableForInput,
    ExpectedVariableForLet,
    InvalidVariable,
    ExpectedEqualsInLet,
    ExpectedOperatorInIf,
    ExpectedThenInIf,
    InvalidLineNumber,

    // Runtime
    DivisionByZero,
    LineNotFound,
    GosubStackOverflow,
    ReturnWithoutGosub,

    // Editor
    ProgramMemoryFull,

    // Mode
    CantUseRunInProgram,
    CantUseListInProgram,
    CantUseNewInProgram,
    CantUseSaveInProgram,
    CantUseLoadInProgram,

    // I/O
    FilenameRequired,
    FileNotFound,
    CannotOpenFile,
    CouldNotOpenLprintFile,
}

impl ErrorKind {
    /// The fixed uppercase message text for this error kind. This is the
    /// wire contract: callers format it as `ERROR: <message>`.
    pub fn message(self) -> &'static str {
        use ErrorKind::*;
        match self {
            UnknownCommand => "UNKNOWN COMMAND",
            ExpectedNumber => "EXPECTED NUMBER",
            InvalidNumber => "INVALID NUMBER",
            ExpectedCloseParen => "EXPECTED ')'",
            UnterminatedString => "UNTERMINATED STRING",
            ExpectedVariableForInput => "EXPECTED VARIABLE FOR INPUT",
            ExpectedVariableForLet => "EXPECTED VARIABLE FOR LET",
            InvalidVariable => "INVALID VARIABLE",
            ExpectedEqualsInLet => "EXPECTED '=' IN LET",
            ExpectedOperatorInIf => "EXPECTED OPERATOR IN IF",
            ExpectedThenInIf => "EXPECTED 'THEN' IN IF",
            InvalidLineNumber => "INVALID LINE NUMBER",

            DivisionByZero => "DIVISION BY ZERO",
            LineNotFound => "LINE NOT FOUND",
            GosubStackOverflow => "GOSUB STACK OVERFLOW",
            ReturnWithoutGosub => "RETURN WITHOUT GOSUB",

            ProgramMemoryFull => "PROGRAM MEMORY FULL",

            CantUseRunInProgram => "CAN'T USE RUN IN A PROGRAM",
            CantUseListInProgram => "CAN'T USE LIST IN A PROGRAM",
            CantUseNewInProgram => "CAN'T USE NEW IN A PROGRAM",
            CantUseSaveInProgram => "CAN'T USE SAVE IN A PROGRAM",
            CantUseLoadInProgram => "CAN'T USE LOAD IN A PROGRAM",

            FilenameRequired => "FILENAME REQUIRED",
            FileNotFound => "FILE NOT FOUND",
            CannotOpenFile => "CANNOT OPEN FILE",
            CouldNotOpenLprintFile => "COULD NOT OPEN LPRINT.OUT FILE",
        }
    }
}

/// A single BASIC-level error. Carries only a kind: every kind's message is
/// a fixed constant, so there is nothing else worth interpolating — no
/// free-form message, no source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicError {
    pub kind: ErrorKind,
}

impl BasicError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for BasicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: {}", self.kind.message())
    }
}

impl std::error::Error for BasicError {}

pub type BasicResult<T> = Result<T, BasicError>;
