//! # Module Hook
//!
//! The interpreter's one extension seam: any statement whose keyword starts
//! with `$` is handed to a `ModuleHook` instead of the built-in dispatcher.
//! This core build ships only `StubModuleHook`, which politely refuses
//! everything — a host embedding this interpreter supplies its own
//! implementation to add keywords without forking the dispatcher.

pub trait ModuleHook {
    /// `keyword` is already upper-cased and includes the leading `$`.
    /// `tail` is the remainder of the line with leading and trailing
    /// whitespace trimmed. Returning `None` means "not handled", which the
    /// dispatcher reports as `UNKNOWN COMMAND`; returning `Some(text)`
    /// prints `text` as the statement's entire output.
    fn handle(&mut self, keyword: &str, tail: &str) -> Option<String>;
}

pub struct StubModuleHook;

impl ModuleHook for StubModuleHook {
    fn handle(&mut self, keyword: &str, _tail: &str) -> Option<String> {
        Some(format!("FRAMEWORK: Command {keyword} is not implemented."))
    }
}
