//! # Value & Arithmetic
//!
//! An 8-bit signed integer with two's-complement wraparound arithmetic.
//! Every expression in the language evaluates to one of these; there is no
//! wider integer type and no floating point (see the Non-goals in the
//! language's overview).

use crate::error::{BasicError, ErrorKind};

/// An 8-bit signed value: the only scalar type the language has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Value(i8);

impl Value {
    pub const ZERO: Value = Value(0);

    pub fn from_i8(v: i8) -> Self {
        Value(v)
    }

    pub fn get(self) -> i8 {
        self.0
    }

    /// Truncate a wider integer to 8-bit two's complement by taking its low
    /// byte. This is how the grammar's `integer` production is allowed to
    /// accept literals outside `[-128, 127]` and have them wrap: `300` casts
    /// to `44`, `-129` casts to `127`.
    pub fn truncate(v: i128) -> Self {
        Value(v as i8)
    }

    pub fn add(self, rhs: Self) -> Self {
        Value(self.0.wrapping_add(rhs.0))
    }

    pub fn sub(self, rhs: Self) -> Self {
        Value(self.0.wrapping_sub(rhs.0))
    }

    pub fn mul(self, rhs: Self) -> Self {
        Value(self.0.wrapping_mul(rhs.0))
    }

    /// Truncating division toward zero. `wrapping_div` already reproduces
    /// the one case where truncating division overflows an `i8`
    /// (`-128 / -1`, mathematically 128) by wrapping back to `-128`.
    pub fn div(self, rhs: Self) -> Result<Self, BasicError> {
        if rhs.0 == 0 {
            return Err(BasicError::new(ErrorKind::DivisionByZero));
        }
        Ok(Value(self.0.wrapping_div(rhs.0)))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
